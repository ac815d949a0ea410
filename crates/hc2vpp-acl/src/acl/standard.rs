//! Standard ACE ⇄ `AclRule` assembly.
//!
//! Combines the address and protocol codecs with the action table and
//! IPv4/IPv6 dispatch.
//!
//! # Address Family
//!
//! On encode the version node of the ACE decides the family. ACEs without a
//! version node are treated as IPv6 when their protocol is ICMPv6 and as IPv4
//! otherwise, so an IPv6 TCP entry needs an explicit node. On decode the
//! rule's `is_ipv6` flag is authoritative.

use hc2vpp_types::{Ipv4Prefix, Ipv6Prefix};
use tracing::debug;
use vpp_acl_api::AclRule;

use super::address;
use super::error::{AclError, Result};
use super::protocol::{decode_protocol, encode_protocol};
use super::types::{AceAction, AceIpVersion, IpVersion, ProtocolSpec, StandardAce};

/// Action codes of standard rules.
pub mod action {
    pub const DENY: u8 = 0;
    pub const PERMIT: u8 = 1;
    pub const STATEFUL: u8 = 2;
}

/// Resolves the address family used to encode an ACE.
pub fn resolve_ip_version(ace: &StandardAce) -> IpVersion {
    match (&ace.ip_version, &ace.protocol) {
        (Some(node), _) => node.version(),
        (None, Some(ProtocolSpec::IcmpV6 { .. })) => IpVersion::V6,
        (None, _) => IpVersion::V4,
    }
}

/// Maps an action to its standard rule code.
pub fn encode_action(ace_name: &str, action: &AceAction) -> Result<u8> {
    match action {
        AceAction::Deny => Ok(action::DENY),
        AceAction::Permit => Ok(action::PERMIT),
        AceAction::Stateful => Ok(action::STATEFUL),
        AceAction::Unknown(name) => Err(AclError::unsupported_action(name.as_str(), ace_name)),
    }
}

/// Maps a standard rule code back to its action.
pub fn decode_action(code: u8) -> Result<AceAction> {
    match code {
        action::DENY => Ok(AceAction::Deny),
        action::PERMIT => Ok(AceAction::Permit),
        action::STATEFUL => Ok(AceAction::Stateful),
        other => Err(AclError::unsupported_action(other.to_string(), "")),
    }
}

/// Encodes a standard ACE into a dataplane rule record.
///
/// # Errors
///
/// Returns [`AclError::UnsupportedProtocol`] or
/// [`AclError::UnsupportedAction`] naming the ACE.
pub fn encode(ace: &StandardAce) -> Result<AclRule> {
    let version = resolve_ip_version(ace);
    let mut rule = AclRule {
        is_permit: encode_action(&ace.name, &ace.action)?,
        is_ipv6: version.as_flag(),
        ..Default::default()
    };

    match (version, ace.ip_version) {
        (
            IpVersion::V4,
            Some(AceIpVersion::Ipv4 {
                source,
                destination,
            }),
        ) => set_ipv4(&mut rule, source.as_ref(), destination.as_ref()),
        (
            IpVersion::V6,
            Some(AceIpVersion::Ipv6 {
                source,
                destination,
            }),
        ) => set_ipv6(&mut rule, source.as_ref(), destination.as_ref()),
        (IpVersion::V4, _) => set_ipv4(&mut rule, None, None),
        (IpVersion::V6, _) => set_ipv6(&mut rule, None, None),
    }

    encode_protocol(ace.protocol.as_ref())
        .map_err(|e| e.for_ace(ace.name.as_str()))?
        .apply_to(&mut rule);

    debug!(ace = %ace.name, rule = %rule, "Encoded standard ACE");
    Ok(rule)
}

fn set_ipv4(
    rule: &mut AclRule,
    source: Option<&Ipv4Prefix>,
    destination: Option<&Ipv4Prefix>,
) {
    let (src, src_len) = address::encode_ipv4(source);
    let (dst, dst_len) = address::encode_ipv4(destination);
    rule.src_ip_addr = src.to_vec();
    rule.src_ip_prefix_len = src_len;
    rule.dst_ip_addr = dst.to_vec();
    rule.dst_ip_prefix_len = dst_len;
}

fn set_ipv6(
    rule: &mut AclRule,
    source: Option<&Ipv6Prefix>,
    destination: Option<&Ipv6Prefix>,
) {
    let (src, src_len) = address::encode_ipv6(source);
    let (dst, dst_len) = address::encode_ipv6(destination);
    rule.src_ip_addr = src.to_vec();
    rule.src_ip_prefix_len = src_len;
    rule.dst_ip_addr = dst.to_vec();
    rule.dst_ip_prefix_len = dst_len;
}

fn decode_ip_version(rule: &AclRule) -> Result<AceIpVersion> {
    Ok(if rule.is_ipv6() {
        AceIpVersion::Ipv6 {
            source: Some(address::decode_ipv6(&rule.src_ip_addr, rule.src_ip_prefix_len)?),
            destination: Some(address::decode_ipv6(&rule.dst_ip_addr, rule.dst_ip_prefix_len)?),
        }
    } else {
        AceIpVersion::Ipv4 {
            source: Some(address::decode_ipv4(&rule.src_ip_addr, rule.src_ip_prefix_len)?),
            destination: Some(address::decode_ipv4(&rule.dst_ip_addr, rule.dst_ip_prefix_len)?),
        }
    })
}

/// Decodes a dataplane rule record into a standard ACE called `name`.
///
/// A rule with protocol 0 has no protocol constraint and decodes without a
/// protocol node.
///
/// # Errors
///
/// Returns [`AclError::MalformedRule`] for unreadable addresses and
/// [`AclError::UnsupportedAction`] for action codes other than 0, 1 and 2.
pub fn decode(name: &str, rule: &AclRule) -> Result<StandardAce> {
    let rule_id = || format!("{} ({})", name, rule);

    let ip_version = decode_ip_version(rule).map_err(|e| e.for_ace(rule_id()))?;
    let action = decode_action(rule.is_permit).map_err(|e| e.for_ace(rule_id()))?;

    let protocol = match decode_protocol(rule) {
        ProtocolSpec::Other { protocol: 0 } => None,
        spec => Some(spec),
    };

    let ace = StandardAce {
        name: name.to_string(),
        ip_version: Some(ip_version),
        protocol,
        action,
    };
    debug!(ace = %ace.name, rule = %rule, "Decoded standard rule");
    Ok(ace)
}
