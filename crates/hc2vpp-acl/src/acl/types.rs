//! Structured ACL model.
//!
//! These are the read-only trees handed to the translator by the
//! configuration layer, and the values it hands back after decoding a
//! dataplane dump. Everything here is (de)serializable so the same shapes can
//! be read from and written to JSON.

use std::fmt;
use std::str::FromStr;

use hc2vpp_types::{IpPrefix, Ipv4Prefix, Ipv6Prefix, MacAddress};
use serde::{Deserialize, Serialize};

/// Packet handling action of an ACE.
///
/// Unrecognized action names are kept in [`AceAction::Unknown`] so that the
/// encoder can reject them with the offending name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AceAction {
    #[default]
    Deny,
    Permit,
    /// Permit and reflect; only valid for standard ACEs.
    Stateful,
    Unknown(String),
}

impl fmt::Display for AceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deny => write!(f, "deny"),
            Self::Permit => write!(f, "permit"),
            Self::Stateful => write!(f, "stateful"),
            Self::Unknown(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for AceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deny" => Ok(Self::Deny),
            "permit" => Ok(Self::Permit),
            "stateful" | "permit-and-reflect" => Ok(Self::Stateful),
            _ => Err(format!("Unknown ACE action: {}", s)),
        }
    }
}

impl From<String> for AceAction {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Unknown(s))
    }
}

impl From<AceAction> for String {
    fn from(action: AceAction) -> String {
        action.to_string()
    }
}

/// Address family of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IpVersion {
    #[default]
    V4,
    V6,
}

impl IpVersion {
    /// Returns the dataplane `is_ipv6` flag value.
    pub fn as_flag(&self) -> u8 {
        match self {
            Self::V4 => 0,
            Self::V6 => 1,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "ipv4"),
            Self::V6 => write!(f, "ipv6"),
        }
    }
}

/// TCP/UDP port range.
///
/// A missing upper port makes the range a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRange {
    pub lower_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_port: Option<u16>,
}

impl PortRange {
    pub fn new(lower_port: u16, upper_port: u16) -> Self {
        Self {
            lower_port,
            upper_port: Some(upper_port),
        }
    }

    pub fn single(port: u16) -> Self {
        Self {
            lower_port: port,
            upper_port: None,
        }
    }

    /// Returns the inclusive `(first, last)` bounds.
    pub fn bounds(&self) -> (u16, u16) {
        (self.lower_port, self.upper_port.unwrap_or(self.lower_port))
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = self.bounds();
        write!(f, "{}-{}", first, last)
    }
}

/// Inclusive ICMP type or code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IcmpRange {
    pub first: u8,
    pub last: u8,
}

impl IcmpRange {
    /// Every type or code.
    pub const ALL: Self = Self {
        first: 0,
        last: u8::MAX,
    };

    pub fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }
}

/// TCP flag bits in the dataplane byte layout (CWR is the lowest bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpFlags {
    pub cwr: bool,
    pub ece: bool,
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl TcpFlags {
    fn as_array(&self) -> [bool; 8] {
        [
            self.cwr, self.ece, self.urg, self.ack, self.psh, self.rst, self.syn, self.fin,
        ]
    }

    /// Packs the flags into the dataplane byte.
    pub fn bits(&self) -> u8 {
        self.as_array()
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .fold(0u8, |acc, (bit, _)| acc | (1 << bit))
    }

    /// Unpacks a dataplane flags byte.
    pub fn from_bits(bits: u8) -> Self {
        let bit = |n: u8| bits & (1 << n) != 0;
        Self {
            cwr: bit(0),
            ece: bit(1),
            urg: bit(2),
            ack: bit(3),
            psh: bit(4),
            rst: bit(5),
            syn: bit(6),
            fin: bit(7),
        }
    }
}

/// L4 protocol constraint of a standard ACE.
///
/// For ICMP and ICMPv6 the type and code ranges travel in the port fields of
/// the dataplane record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProtocolSpec {
    Icmp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_range: Option<IcmpRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code_range: Option<IcmpRange>,
    },
    IcmpV6 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_range: Option<IcmpRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code_range: Option<IcmpRange>,
    },
    Tcp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_port: Option<PortRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination_port: Option<PortRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags_mask: Option<TcpFlags>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<TcpFlags>,
    },
    Udp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_port: Option<PortRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination_port: Option<PortRange>,
    },
    /// Any other IP protocol number, passed through as is.
    Other { protocol: u8 },
    /// A protocol node this translator does not understand.
    #[serde(other)]
    Unknown,
}

impl ProtocolSpec {
    /// Returns a short protocol name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Icmp { .. } => "icmp",
            Self::IcmpV6 { .. } => "icmp-v6",
            Self::Tcp { .. } => "tcp",
            Self::Udp { .. } => "udp",
            Self::Other { .. } => "other",
            Self::Unknown => "unknown",
        }
    }
}

/// Address family node of a standard ACE, carrying the matched prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum AceIpVersion {
    Ipv4 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<Ipv4Prefix>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination: Option<Ipv4Prefix>,
    },
    Ipv6 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<Ipv6Prefix>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination: Option<Ipv6Prefix>,
    },
}

impl AceIpVersion {
    pub fn version(&self) -> IpVersion {
        match self {
            Self::Ipv4 { .. } => IpVersion::V4,
            Self::Ipv6 { .. } => IpVersion::V6,
        }
    }
}

/// Standard (L3/L4) access control entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardAce {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<AceIpVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolSpec>,
    pub action: AceAction,
}

/// Ethernet match of a MAC+IP entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EthMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mac: Option<MacAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mac_mask: Option<MacAddress>,
}

/// L3 match of a MAC+IP entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum MacIpL3 {
    Ipv4 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<Ipv4Prefix>,
    },
    Ipv6 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<Ipv6Prefix>,
    },
}

/// MAC+IP access control entry, matching source MAC and source prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacIpAce {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth: Option<EthMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l3: Option<MacIpL3>,
    pub action: AceAction,
}

/// Action of a MAC+IP rule; there is no stateful variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacIpAction {
    Deny,
    Permit,
}

impl MacIpAction {
    /// Returns the dataplane action byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::Deny => 0,
            Self::Permit => 1,
        }
    }
}

impl From<MacIpAction> for AceAction {
    fn from(action: MacIpAction) -> Self {
        match action {
            MacIpAction::Deny => AceAction::Deny,
            MacIpAction::Permit => AceAction::Permit,
        }
    }
}

/// Fully resolved MAC+IP rule, ready to be packed into a dataplane record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacIpRule {
    pub is_ipv6: bool,
    pub src_mac: MacAddress,
    pub src_mac_mask: MacAddress,
    pub src_prefix: IpPrefix,
    pub action: MacIpAction,
}

/// Kind of an ACL, which decides the dataplane table it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AclKind {
    #[default]
    #[serde(rename = "vpp-acl")]
    Vpp,
    #[serde(rename = "vpp-macip-acl")]
    MacIp,
}

impl fmt::Display for AclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vpp => write!(f, "vpp-acl"),
            Self::MacIp => write!(f, "vpp-macip-acl"),
        }
    }
}

impl FromStr for AclKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vpp-acl" => Ok(Self::Vpp),
            "vpp-macip-acl" => Ok(Self::MacIp),
            _ => Err(format!("Unknown ACL kind: {}", s)),
        }
    }
}

/// One entry of an ACL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "ace-type")]
pub enum Ace {
    #[serde(rename = "vpp-ace")]
    Standard(StandardAce),
    #[serde(rename = "vpp-macip-ace")]
    MacIp(MacIpAce),
}

impl Ace {
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(ace) => &ace.name,
            Self::MacIp(ace) => &ace.name,
        }
    }

    /// Returns the ACL kind this entry belongs in.
    pub fn kind(&self) -> AclKind {
        match self {
            Self::Standard(_) => AclKind::Vpp,
            Self::MacIp(_) => AclKind::MacIp,
        }
    }
}

/// A named, ordered list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Acl {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AclKind,
    #[serde(default)]
    pub aces: Vec<Ace>,
}

/// ACL assignments of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceAclRefs {
    pub interface: String,
    #[serde(default)]
    pub ingress: Vec<String>,
    #[serde(default)]
    pub egress: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macip: Option<String>,
}

impl InterfaceAclRefs {
    /// Returns true if the interface references `acl_name` for `kind`.
    pub fn references(&self, kind: AclKind, acl_name: &str) -> bool {
        match kind {
            AclKind::Vpp => self
                .ingress
                .iter()
                .chain(self.egress.iter())
                .any(|name| name == acl_name),
            AclKind::MacIp => self.macip.as_deref() == Some(acl_name),
        }
    }
}
