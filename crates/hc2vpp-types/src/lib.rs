//! Common address types for the VPP management-plane translators.
//!
//! This crate provides type-safe representations of the network primitives
//! that appear on both sides of a translation, the structured configuration
//! model and the dataplane's binary records:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`IpAddress`]: IPv4 and IPv6 addresses
//! - [`Ipv4Prefix`] / [`Ipv6Prefix`]: family-specific network prefixes
//! - [`IpPrefix`]: a prefix of either family (CIDR notation)

mod ip;
mod mac;

pub use ip::{IpAddress, IpPrefix, Ipv4Address, Ipv4Prefix, Ipv6Address, Ipv6Prefix};
pub use mac::MacAddress;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP prefix format: {0}")]
    InvalidIpPrefix(String),
}
