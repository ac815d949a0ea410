//! Whole-list conversion between ACE lists and dataplane rule lists.
//!
//! Lists convert all-or-nothing: the first entry that fails aborts the
//! conversion, so a partial list never reaches the dataplane. Order is kept,
//! rule `i` is always entry `i`.

use serde::Serialize;
use tracing::debug;
use vpp_acl_api::{AclRule, MacipAclRule};

use super::context::AclContextManager;
use super::error::{AclError, Result};
use super::types::{Ace, Acl, AclKind, MacIpAce, StandardAce};
use super::{macip, standard};

/// Encodes standard ACEs into rule records.
pub fn to_standard_rules(aces: &[StandardAce]) -> Result<Vec<AclRule>> {
    aces.iter().map(standard::encode).collect()
}

/// Encodes MAC+IP ACEs into rule records.
pub fn to_macip_rules(aces: &[MacIpAce]) -> Result<Vec<MacipAclRule>> {
    aces.iter().map(macip::encode).collect()
}

/// Decodes the rules of a standard ACL, naming entries through `ctx`.
pub fn to_standard_aces(
    acl_name: &str,
    rules: &[AclRule],
    ctx: &mut AclContextManager,
) -> Result<Vec<StandardAce>> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| standard::decode(&ctx.ace_name(acl_name, i), rule))
        .collect()
}

/// Decodes the rules of a MAC+IP ACL, naming entries through `ctx`.
pub fn to_macip_aces(
    acl_name: &str,
    rules: &[MacipAclRule],
    ctx: &mut AclContextManager,
) -> Result<Vec<MacIpAce>> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| macip::decode_binary(&ctx.ace_name(acl_name, i), rule))
        .collect()
}

/// Rules of one ACL, ready for the dataplane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AclRules {
    Standard(Vec<AclRule>),
    MacIp(Vec<MacipAclRule>),
}

impl AclRules {
    pub fn len(&self) -> usize {
        match self {
            Self::Standard(rules) => rules.len(),
            Self::MacIp(rules) => rules.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encodes every entry of an ACL according to its kind.
///
/// # Errors
///
/// Returns [`AclError::Validation`] for an entry of the wrong kind, or the
/// first translation error.
pub fn encode_acl(acl: &Acl) -> Result<AclRules> {
    let wrong_kind = |ace: &Ace| {
        AclError::validation(
            acl.name.as_str(),
            format!("entry {} does not belong in a {} list", ace.name(), acl.kind),
        )
    };

    let rules = match acl.kind {
        AclKind::Vpp => AclRules::Standard(
            acl.aces
                .iter()
                .map(|ace| match ace {
                    Ace::Standard(ace) => standard::encode(ace),
                    other => Err(wrong_kind(other)),
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        AclKind::MacIp => AclRules::MacIp(
            acl.aces
                .iter()
                .map(|ace| match ace {
                    Ace::MacIp(ace) => macip::encode(ace),
                    other => Err(wrong_kind(other)),
                })
                .collect::<Result<Vec<_>>>()?,
        ),
    };

    debug!(acl = %acl.name, kind = %acl.kind, rules = rules.len(), "Encoded ACL");
    Ok(rules)
}

/// Returns the entry names of an ACL in order.
pub fn ace_names(acl: &Acl) -> Vec<String> {
    acl.aces.iter().map(|ace| ace.name().to_string()).collect()
}
