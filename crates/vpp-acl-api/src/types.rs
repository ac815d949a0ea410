//! Fixed-layout ACL records of the VPP ACL plugin.
//!
//! Field names and widths follow the plugin's `acl_rule_t` and
//! `macip_acl_rule_t` messages. The dataplane reinterprets nothing, so these
//! must stay bit-exact: 4-byte IPv4 or 16-byte IPv6 addresses, one-byte
//! prefix lengths, two-byte port/ICMP fields and one-byte TCP flags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// IP protocol numbers understood by the ACL plugin.
pub mod proto {
    /// No protocol constraint; the dataplane ignores the L4 fields.
    pub const ANY: u8 = 0;
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const ICMPV6: u8 = 58;
}

/// Highest L4 port number.
pub const MAX_PORT: u16 = 65535;

/// One standard ACL rule as carried by `acl_add_replace` and `acl_details`.
///
/// The source/destination port fields double as ICMP type/code fields when
/// `proto` is ICMP or ICMPv6. Address buffers may be empty, which the
/// dataplane treats the same as an all-zero address with prefix length 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclRule {
    pub is_permit: u8,
    pub is_ipv6: u8,
    #[serde(default)]
    pub src_ip_addr: Vec<u8>,
    pub src_ip_prefix_len: u8,
    #[serde(default)]
    pub dst_ip_addr: Vec<u8>,
    pub dst_ip_prefix_len: u8,
    pub proto: u8,
    pub srcport_or_icmptype_first: u16,
    pub srcport_or_icmptype_last: u16,
    pub dstport_or_icmpcode_first: u16,
    pub dstport_or_icmpcode_last: u16,
    pub tcp_flags_mask: u8,
    pub tcp_flags_value: u8,
}

impl AclRule {
    /// Returns true if the rule matches IPv6 traffic.
    pub fn is_ipv6(&self) -> bool {
        self.is_ipv6 != 0
    }
}

/// Renders an address buffer as dotted/colon notation when its length is
/// recognised, and as raw hex otherwise.
fn fmt_addr(f: &mut fmt::Formatter<'_>, addr: &[u8], prefix_len: u8) -> fmt::Result {
    match addr.len() {
        0 => write!(f, "any"),
        4 => write!(
            f,
            "{}.{}.{}.{}/{}",
            addr[0], addr[1], addr[2], addr[3], prefix_len
        ),
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(addr);
            write!(f, "{}/{}", std::net::Ipv6Addr::from(octets), prefix_len)
        }
        _ => {
            for b in addr {
                write!(f, "{:02x}", b)?;
            }
            write!(f, "/{}", prefix_len)
        }
    }
}

impl fmt::Display for AclRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} proto {} src ",
            if self.is_ipv6() { "ipv6" } else { "ipv4" },
            self.proto
        )?;
        fmt_addr(f, &self.src_ip_addr, self.src_ip_prefix_len)?;
        write!(f, " dst ")?;
        fmt_addr(f, &self.dst_ip_addr, self.dst_ip_prefix_len)?;
        write!(
            f,
            " sport {}-{} dport {}-{} flags {:#04x}/{:#04x} action {}",
            self.srcport_or_icmptype_first,
            self.srcport_or_icmptype_last,
            self.dstport_or_icmpcode_first,
            self.dstport_or_icmpcode_last,
            self.tcp_flags_value,
            self.tcp_flags_mask,
            self.is_permit
        )
    }
}

/// One MAC+IP rule as carried by `macip_acl_add` and `macip_acl_details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacipAclRule {
    pub is_permit: u8,
    pub is_ipv6: u8,
    pub src_mac: [u8; 6],
    pub src_mac_mask: [u8; 6],
    #[serde(default)]
    pub src_ip_addr: Vec<u8>,
    pub src_ip_prefix_len: u8,
}

impl MacipAclRule {
    /// Returns true if the rule matches IPv6 traffic.
    pub fn is_ipv6(&self) -> bool {
        self.is_ipv6 != 0
    }
}

impl fmt::Display for MacipAclRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.src_mac;
        let k = &self.src_mac_mask;
        write!(
            f,
            "{} mac {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x} mask {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x} src ",
            if self.is_ipv6() { "ipv6" } else { "ipv4" },
            m[0], m[1], m[2], m[3], m[4], m[5],
            k[0], k[1], k[2], k[3], k[4], k[5]
        )?;
        fmt_addr(f, &self.src_ip_addr, self.src_ip_prefix_len)?;
        write!(f, " action {}", self.is_permit)
    }
}
