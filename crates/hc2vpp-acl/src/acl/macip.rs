//! MAC+IP ACE ⇄ `MacipAclRule` translation.
//!
//! MAC+IP rules match a source MAC under a mask together with a source
//! prefix. Unlike standard rules they only permit or deny, and the address
//! family comes from the tag of the L3 node, never from a protocol.

use hc2vpp_types::{IpPrefix, Ipv4Prefix, Ipv6Prefix, MacAddress};
use tracing::debug;
use vpp_acl_api::MacipAclRule;

use super::address;
use super::error::{AclError, Result};
use super::types::{AceAction, EthMatch, MacIpAce, MacIpAction, MacIpL3, MacIpRule};

fn macip_action(ace: &MacIpAce) -> Result<MacIpAction> {
    match &ace.action {
        AceAction::Deny => Ok(MacIpAction::Deny),
        AceAction::Permit => Ok(MacIpAction::Permit),
        other => Err(AclError::unsupported_action(other.to_string(), ace.name.as_str())),
    }
}

/// Maps the action of a MAC+IP ACE to its rule code: permit is 1, deny is 0.
///
/// # Errors
///
/// Returns [`AclError::UnsupportedAction`] for every other action, stateful
/// included.
pub fn encode_action(ace: &MacIpAce) -> Result<u8> {
    macip_action(ace).map(|action| action.code())
}

/// Resolves a MAC+IP ACE into its rule fields.
///
/// # Errors
///
/// Returns [`AclError::MalformedRule`] if the Ethernet node, source MAC or
/// MAC mask is missing, and [`AclError::UnsupportedAction`] as
/// [`encode_action`] does.
pub fn decode_rule(ace: &MacIpAce) -> Result<MacIpRule> {
    let eth = ace
        .eth
        .as_ref()
        .ok_or_else(|| AclError::malformed(ace.name.as_str(), "missing ethernet match"))?;
    let src_mac = eth
        .source_mac
        .ok_or_else(|| AclError::malformed(ace.name.as_str(), "missing source MAC"))?;
    let src_mac_mask = eth
        .source_mac_mask
        .ok_or_else(|| AclError::malformed(ace.name.as_str(), "missing source MAC mask"))?;

    let src_prefix = match ace.l3 {
        Some(MacIpL3::Ipv6 { source }) => IpPrefix::from(source.unwrap_or(Ipv6Prefix::ANY)),
        Some(MacIpL3::Ipv4 { source }) => IpPrefix::from(source.unwrap_or(Ipv4Prefix::ANY)),
        None => IpPrefix::from(Ipv4Prefix::ANY),
    };

    Ok(MacIpRule {
        is_ipv6: src_prefix.is_ipv6(),
        src_mac,
        src_mac_mask,
        src_prefix,
        action: macip_action(ace)?,
    })
}

/// Encodes a MAC+IP ACE into a dataplane rule record.
pub fn encode(ace: &MacIpAce) -> Result<MacipAclRule> {
    let resolved = decode_rule(ace)?;

    let (src_ip_addr, src_ip_prefix_len) = match (
        resolved.src_prefix.as_ipv4(),
        resolved.src_prefix.as_ipv6(),
    ) {
        (_, Some(v6)) => {
            let (bytes, len) = address::encode_ipv6(Some(&v6));
            (bytes.to_vec(), len)
        }
        (v4, None) => {
            let (bytes, len) = address::encode_ipv4(v4.as_ref());
            (bytes.to_vec(), len)
        }
    };

    let rule = MacipAclRule {
        is_permit: resolved.action.code(),
        is_ipv6: u8::from(resolved.is_ipv6),
        src_mac: *resolved.src_mac.as_bytes(),
        src_mac_mask: *resolved.src_mac_mask.as_bytes(),
        src_ip_addr,
        src_ip_prefix_len,
    };
    debug!(ace = %ace.name, rule = %rule, "Encoded MAC+IP ACE");
    Ok(rule)
}

/// Decodes a MAC+IP rule from a `macip_acl_dump` reply into an ACE called
/// `name`.
pub fn decode_binary(name: &str, rule: &MacipAclRule) -> Result<MacIpAce> {
    let rule_id = || format!("{} ({})", name, rule);

    let l3 = if rule.is_ipv6() {
        address::decode_ipv6(&rule.src_ip_addr, rule.src_ip_prefix_len).map(|source| {
            MacIpL3::Ipv6 {
                source: Some(source),
            }
        })
    } else {
        address::decode_ipv4(&rule.src_ip_addr, rule.src_ip_prefix_len).map(|source| {
            MacIpL3::Ipv4 {
                source: Some(source),
            }
        })
    }
    .map_err(|e| e.for_ace(rule_id()))?;

    let action = match rule.is_permit {
        0 => MacIpAction::Deny,
        1 => MacIpAction::Permit,
        other => return Err(AclError::unsupported_action(other.to_string(), rule_id())),
    };

    Ok(MacIpAce {
        name: name.to_string(),
        eth: Some(EthMatch {
            source_mac: Some(MacAddress::new(rule.src_mac)),
            source_mac_mask: Some(MacAddress::new(rule.src_mac_mask)),
        }),
        l3: Some(l3),
        action: action.into(),
    })
}
