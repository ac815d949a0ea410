//! Prefix fields of ACL rule records.
//!
//! An absent prefix encodes as the all-zero address with prefix length 0,
//! which the dataplane treats as "match any address". Callers never have to
//! branch on presence before encoding.

use hc2vpp_types::{Ipv4Address, Ipv4Prefix, Ipv6Address, Ipv6Prefix};

use super::error::{AclError, Result};

/// Encodes an optional IPv4 prefix into address bytes and prefix length.
pub fn encode_ipv4(prefix: Option<&Ipv4Prefix>) -> ([u8; 4], u8) {
    match prefix {
        Some(prefix) => (prefix.address().octets(), prefix.prefix_len()),
        None => ([0; 4], 0),
    }
}

/// Encodes an optional IPv6 prefix into address bytes and prefix length.
pub fn encode_ipv6(prefix: Option<&Ipv6Prefix>) -> ([u8; 16], u8) {
    match prefix {
        Some(prefix) => (prefix.address().octets(), prefix.prefix_len()),
        None => ([0; 16], 0),
    }
}

/// Decodes an IPv4 prefix from a rule's address buffer.
///
/// Dumps may pad IPv4 addresses to 16 bytes; only the first four are read.
/// An empty buffer decodes to `0.0.0.0/0`.
pub fn decode_ipv4(bytes: &[u8], prefix_len: u8) -> Result<Ipv4Prefix> {
    if bytes.is_empty() && prefix_len == 0 {
        return Ok(Ipv4Prefix::ANY);
    }
    let octets: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            AclError::malformed("", format!("IPv4 address has {} bytes", bytes.len()))
        })?;
    Ipv4Prefix::new(Ipv4Address::from(octets), prefix_len)
        .map_err(|e| AclError::malformed("", e.to_string()))
}

/// Decodes an IPv6 prefix from a rule's address buffer.
///
/// An empty buffer decodes to `::/0`.
pub fn decode_ipv6(bytes: &[u8], prefix_len: u8) -> Result<Ipv6Prefix> {
    if bytes.is_empty() && prefix_len == 0 {
        return Ok(Ipv6Prefix::ANY);
    }
    let octets: [u8; 16] = bytes
        .get(..16)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            AclError::malformed("", format!("IPv6 address has {} bytes", bytes.len()))
        })?;
    Ipv6Prefix::new(Ipv6Address::from(octets), prefix_len)
        .map_err(|e| AclError::malformed("", e.to_string()))
}
