//! IP address and prefix types with safe parsing.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An IPv4 address wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub const UNSPECIFIED: Self = Ipv4Address(Ipv4Addr::UNSPECIFIED);

    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Ipv4Address(Ipv4Addr::new(a, b, c, d))
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Ipv4Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv4Addr>()
            .map(Ipv4Address)
            .map_err(|_| ParseError::InvalidIpAddress(s.to_string()))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(addr)
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(octets: [u8; 4]) -> Self {
        Ipv4Address(Ipv4Addr::from(octets))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

/// An IPv6 address wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ipv6Address(Ipv6Addr);

impl Ipv6Address {
    pub const UNSPECIFIED: Self = Ipv6Address(Ipv6Addr::UNSPECIFIED);

    pub const fn octets(&self) -> [u8; 16] {
        self.0.octets()
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Ipv6Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv6Addr>()
            .map(Ipv6Address)
            .map_err(|_| ParseError::InvalidIpAddress(s.to_string()))
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Ipv6Address(addr)
    }
}

impl From<[u8; 16]> for Ipv6Address {
    fn from(octets: [u8; 16]) -> Self {
        Ipv6Address(Ipv6Addr::from(octets))
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        addr.0
    }
}

/// An IP address that can be either IPv4 or IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpAddress {
    V4(Ipv4Address),
    V6(Ipv6Address),
}

impl IpAddress {
    /// Returns true if this is an IPv4 address.
    pub const fn is_ipv4(&self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    /// Returns true if this is an IPv6 address.
    pub const fn is_ipv6(&self) -> bool {
        matches!(self, IpAddress::V6(_))
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4(addr) => fmt::Display::fmt(addr, f),
            IpAddress::V6(addr) => fmt::Display::fmt(addr, f),
        }
    }
}

impl FromStr for IpAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            s.parse::<Ipv6Address>().map(IpAddress::V6)
        } else {
            s.parse::<Ipv4Address>().map(IpAddress::V4)
        }
    }
}

impl From<Ipv4Address> for IpAddress {
    fn from(addr: Ipv4Address) -> Self {
        IpAddress::V4(addr)
    }
}

impl From<Ipv6Address> for IpAddress {
    fn from(addr: Ipv6Address) -> Self {
        IpAddress::V6(addr)
    }
}

/// Splits `addr/len` into its two halves.
fn split_prefix(s: &str) -> Result<(&str, u8), ParseError> {
    let (addr_str, len_str) = s
        .rsplit_once('/')
        .ok_or_else(|| ParseError::InvalidIpPrefix(s.to_string()))?;
    let prefix_len = len_str
        .parse()
        .map_err(|_| ParseError::InvalidIpPrefix(s.to_string()))?;
    Ok((addr_str, prefix_len))
}

fn check_prefix_len(prefix_len: u8, max_len: u8) -> Result<(), ParseError> {
    if prefix_len > max_len {
        return Err(ParseError::InvalidIpPrefix(format!(
            "prefix length {} exceeds maximum {} for address type",
            prefix_len, max_len
        )));
    }
    Ok(())
}

/// An IPv4 prefix (e.g., 10.0.0.0/24).
///
/// The address is kept exactly as given; host bits are not cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Prefix {
    address: Ipv4Address,
    prefix_len: u8,
}

impl Ipv4Prefix {
    /// Matches every IPv4 address (0.0.0.0/0).
    pub const ANY: Self = Ipv4Prefix {
        address: Ipv4Address::UNSPECIFIED,
        prefix_len: 0,
    };

    /// Creates a new IPv4 prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length exceeds 32.
    pub fn new(address: Ipv4Address, prefix_len: u8) -> Result<Self, ParseError> {
        check_prefix_len(prefix_len, 32)?;
        Ok(Ipv4Prefix {
            address,
            prefix_len,
        })
    }

    pub const fn address(&self) -> Ipv4Address {
        self.address
    }

    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, prefix_len) = split_prefix(s)?;
        Ipv4Prefix::new(addr_str.parse()?, prefix_len)
    }
}

impl TryFrom<String> for Ipv4Prefix {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv4Prefix> for String {
    fn from(prefix: Ipv4Prefix) -> String {
        prefix.to_string()
    }
}

/// An IPv6 prefix (e.g., 2001:db8::/32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv6Prefix {
    address: Ipv6Address,
    prefix_len: u8,
}

impl Ipv6Prefix {
    /// Matches every IPv6 address (::/0).
    pub const ANY: Self = Ipv6Prefix {
        address: Ipv6Address::UNSPECIFIED,
        prefix_len: 0,
    };

    /// Creates a new IPv6 prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length exceeds 128.
    pub fn new(address: Ipv6Address, prefix_len: u8) -> Result<Self, ParseError> {
        check_prefix_len(prefix_len, 128)?;
        Ok(Ipv6Prefix {
            address,
            prefix_len,
        })
    }

    pub const fn address(&self) -> Ipv6Address {
        self.address
    }

    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv6Prefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, prefix_len) = split_prefix(s)?;
        Ipv6Prefix::new(addr_str.parse()?, prefix_len)
    }
}

impl TryFrom<String> for Ipv6Prefix {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv6Prefix> for String {
    fn from(prefix: Ipv6Prefix) -> String {
        prefix.to_string()
    }
}

/// An IP prefix of either family in CIDR notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpPrefix {
    address: IpAddress,
    prefix_len: u8,
}

impl IpPrefix {
    /// Creates a new IP prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length is invalid for the address type
    /// (>32 for IPv4, >128 for IPv6).
    pub fn new(address: IpAddress, prefix_len: u8) -> Result<Self, ParseError> {
        let max_len = match address {
            IpAddress::V4(_) => 32,
            IpAddress::V6(_) => 128,
        };
        check_prefix_len(prefix_len, max_len)?;

        Ok(IpPrefix {
            address,
            prefix_len,
        })
    }

    /// Returns the network address of this prefix.
    pub const fn address(&self) -> &IpAddress {
        &self.address
    }

    /// Returns the prefix length in bits.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Returns true if this is an IPv4 prefix.
    pub const fn is_ipv4(&self) -> bool {
        self.address.is_ipv4()
    }

    /// Returns true if this is an IPv6 prefix.
    pub const fn is_ipv6(&self) -> bool {
        self.address.is_ipv6()
    }

    /// Returns the IPv4 view of this prefix, if it is one.
    pub const fn as_ipv4(&self) -> Option<Ipv4Prefix> {
        match self.address {
            IpAddress::V4(address) => Some(Ipv4Prefix {
                address,
                prefix_len: self.prefix_len,
            }),
            IpAddress::V6(_) => None,
        }
    }

    /// Returns the IPv6 view of this prefix, if it is one.
    pub const fn as_ipv6(&self) -> Option<Ipv6Prefix> {
        match self.address {
            IpAddress::V6(address) => Some(Ipv6Prefix {
                address,
                prefix_len: self.prefix_len,
            }),
            IpAddress::V4(_) => None,
        }
    }
}

impl From<Ipv4Prefix> for IpPrefix {
    fn from(prefix: Ipv4Prefix) -> Self {
        IpPrefix {
            address: IpAddress::V4(prefix.address),
            prefix_len: prefix.prefix_len,
        }
    }
}

impl From<Ipv6Prefix> for IpPrefix {
    fn from(prefix: Ipv6Prefix) -> Self {
        IpPrefix {
            address: IpAddress::V6(prefix.address),
            prefix_len: prefix.prefix_len,
        }
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for IpPrefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, prefix_len) = split_prefix(s)?;
        IpPrefix::new(addr_str.parse()?, prefix_len)
    }
}

impl TryFrom<String> for IpPrefix {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IpPrefix> for String {
    fn from(prefix: IpPrefix) -> String {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ipv4_parse() {
        let addr: Ipv4Address = "192.168.1.1".parse().unwrap();
        assert_eq!(addr.octets(), [192, 168, 1, 1]);
    }

    #[test]
    fn test_ipv6_parse() {
        let addr: Ipv6Address = "2001:db8::1".parse().unwrap();
        assert_eq!(&addr.octets()[..4], &[0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(addr.octets()[15], 1);
    }

    #[test]
    fn test_address_from_octets() {
        assert_eq!(
            Ipv4Address::from([10, 0, 0, 1]),
            Ipv4Address::new(10, 0, 0, 1)
        );
        let mut raw = [0u8; 16];
        raw[0] = 0x20;
        raw[1] = 0x01;
        raw[15] = 1;
        assert_eq!(Ipv6Address::from(raw).to_string(), "2001::1");
    }

    #[test]
    fn test_ip_address_discrimination() {
        let v4: IpAddress = "10.0.0.1".parse().unwrap();
        assert!(v4.is_ipv4());
        assert!(!v4.is_ipv6());

        let v6: IpAddress = "::1".parse().unwrap();
        assert!(!v6.is_ipv4());
        assert!(v6.is_ipv6());
    }

    #[test]
    fn test_family_prefix_parse() {
        let v4: Ipv4Prefix = "10.0.0.0/24".parse().unwrap();
        assert_eq!(v4.address().octets(), [10, 0, 0, 0]);
        assert_eq!(v4.prefix_len(), 24);

        let v6: Ipv6Prefix = "2001:db8::/48".parse().unwrap();
        assert_eq!(v6.prefix_len(), 48);

        assert!("10.0.0.0/33".parse::<Ipv4Prefix>().is_err());
        assert!("2001:db8::/129".parse::<Ipv6Prefix>().is_err());
        assert!("2001:db8::/64".parse::<Ipv4Prefix>().is_err());
        assert!("10.0.0.0".parse::<Ipv4Prefix>().is_err());
    }

    #[test]
    fn test_prefix_keeps_host_bits() {
        let v4: Ipv4Prefix = "10.1.2.3/8".parse().unwrap();
        assert_eq!(v4.address().octets(), [10, 1, 2, 3]);
    }

    #[test]
    fn test_ip_prefix_parse() {
        let prefix: IpPrefix = "10.0.0.0/24".parse().unwrap();
        assert!(prefix.is_ipv4());
        assert_eq!(prefix.prefix_len(), 24);

        let v6_prefix: IpPrefix = "2001:db8::/32".parse().unwrap();
        assert!(v6_prefix.is_ipv6());
        assert_eq!(v6_prefix.prefix_len(), 32);
    }

    #[test]
    fn test_ip_prefix_family_views() {
        let prefix: IpPrefix = "192.168.0.0/16".parse().unwrap();
        assert_eq!(prefix.as_ipv4(), Some("192.168.0.0/16".parse().unwrap()));
        assert_eq!(prefix.as_ipv6(), None);

        let v6: Ipv6Prefix = "fe80::/10".parse().unwrap();
        let generic = IpPrefix::from(v6);
        assert_eq!(generic.as_ipv6(), Some(v6));
    }

    #[test]
    fn test_any_prefixes() {
        assert_eq!(Ipv4Prefix::ANY.to_string(), "0.0.0.0/0");
        assert_eq!(Ipv6Prefix::ANY.to_string(), "::/0");
    }

    #[test]
    fn test_invalid_prefix_length() {
        assert!("10.0.0.0/33".parse::<IpPrefix>().is_err());
        assert!("2001:db8::/129".parse::<IpPrefix>().is_err());
    }

    #[test]
    fn test_prefix_serde_as_string() {
        let prefix: Ipv4Prefix = serde_json::from_str("\"10.0.0.0/24\"").unwrap();
        assert_eq!(prefix.prefix_len(), 24);
        assert_eq!(serde_json::to_string(&prefix).unwrap(), "\"10.0.0.0/24\"");
        assert!(serde_json::from_str::<Ipv4Prefix>("\"10.0.0.0/40\"").is_err());
    }

    #[test]
    fn test_display() {
        let prefix: IpPrefix = "192.168.0.0/16".parse().unwrap();
        assert_eq!(prefix.to_string(), "192.168.0.0/16");
    }
}
