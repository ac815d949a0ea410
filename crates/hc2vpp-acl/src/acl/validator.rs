//! ACL checks run before anything is sent to the dataplane.

use tracing::warn;

use super::error::{AclError, Result};
use super::types::{Acl, InterfaceAclRefs};

fn validate_aces(acl: &Acl) -> Result<()> {
    if acl.aces.is_empty() {
        warn!(acl = %acl.name, "Rejecting ACL without entries");
        return Err(AclError::validation(
            acl.name.as_str(),
            "the list of entries is empty",
        ));
    }

    if let Some(ace) = acl.aces.iter().find(|ace| ace.kind() != acl.kind) {
        warn!(acl = %acl.name, ace = ace.name(), "Rejecting ACL with mixed entry kinds");
        return Err(AclError::validation(
            acl.name.as_str(),
            format!(
                "entry {} is a {} entry, not allowed in a {} list",
                ace.name(),
                ace.kind(),
                acl.kind
            ),
        ));
    }

    Ok(())
}

/// Checks an ACL about to be created.
pub fn validate_write(acl: &Acl) -> Result<()> {
    validate_aces(acl)
}

/// Checks the new contents of an existing ACL.
pub fn validate_update(acl: &Acl) -> Result<()> {
    validate_aces(acl)
}

/// Checks that an ACL can be deleted, i.e. that no interface uses it.
pub fn validate_delete(acl: &Acl, interfaces: &[InterfaceAclRefs]) -> Result<()> {
    let users: Vec<&str> = interfaces
        .iter()
        .filter(|refs| refs.references(acl.kind, &acl.name))
        .map(|refs| refs.interface.as_str())
        .collect();

    if !users.is_empty() {
        warn!(acl = %acl.name, interfaces = ?users, "Rejecting delete of ACL in use");
        return Err(AclError::validation(
            acl.name.as_str(),
            format!("still assigned to interfaces {}", users.join(", ")),
        ));
    }
    Ok(())
}
