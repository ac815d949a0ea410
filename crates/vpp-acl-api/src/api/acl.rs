//! ACL plugin requests, replies, and the transport trait.

use serde::{Deserialize, Serialize};

use super::interface::{
    AclInterfaceListDetails, AclInterfaceSetAclList, MacipAclInterfaceAddDel,
    MacipAclInterfaceListDetails,
};
use crate::error::VppResult;
use crate::types::{AclRule, MacipAclRule};

/// `acl_index` value asking `acl_add_replace` to allocate a new ACL.
pub const NEW_ACL_INDEX: u32 = u32::MAX;

/// Request body of `acl_add_replace`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclAddReplace {
    /// Index to replace, or [`NEW_ACL_INDEX`] to create.
    pub acl_index: u32,
    /// Free-form tag stored alongside the ACL.
    pub tag: String,
    pub rules: Vec<AclRule>,
}

impl AclAddReplace {
    /// Builds a request creating a new ACL.
    pub fn create(tag: impl Into<String>, rules: Vec<AclRule>) -> Self {
        Self {
            acl_index: NEW_ACL_INDEX,
            tag: tag.into(),
            rules,
        }
    }

    /// Builds a request replacing the rules of an existing ACL.
    pub fn replace(acl_index: u32, tag: impl Into<String>, rules: Vec<AclRule>) -> Self {
        Self {
            acl_index,
            tag: tag.into(),
            rules,
        }
    }

    /// Returns true if this request allocates a new ACL.
    pub fn is_create(&self) -> bool {
        self.acl_index == NEW_ACL_INDEX
    }
}

/// One entry of an `acl_dump` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclDetails {
    pub acl_index: u32,
    pub tag: String,
    pub rules: Vec<AclRule>,
}

/// Request body of `macip_acl_add`. MAC+IP ACLs cannot be replaced in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacipAclAdd {
    pub tag: String,
    pub rules: Vec<MacipAclRule>,
}

/// One entry of a `macip_acl_dump` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacipAclDetails {
    pub acl_index: u32,
    pub tag: String,
    pub rules: Vec<MacipAclRule>,
}

/// Calls exposed by the VPP ACL plugin.
///
/// Implementations own the connection, timeouts and retries. Each method
/// blocks until the reply arrives or the transport gives up.
pub trait AclApi {
    /// Creates or replaces a standard ACL and returns its index.
    fn acl_add_replace(&mut self, request: &AclAddReplace) -> VppResult<u32>;

    /// Deletes a standard ACL.
    fn acl_del(&mut self, acl_index: u32) -> VppResult<()>;

    /// Dumps one standard ACL, or all of them for [`NEW_ACL_INDEX`].
    fn acl_dump(&self, acl_index: u32) -> VppResult<Vec<AclDetails>>;

    /// Creates a MAC+IP ACL and returns its index.
    fn macip_acl_add(&mut self, request: &MacipAclAdd) -> VppResult<u32>;

    /// Deletes a MAC+IP ACL.
    fn macip_acl_del(&mut self, acl_index: u32) -> VppResult<()>;

    /// Dumps one MAC+IP ACL, or all of them for [`NEW_ACL_INDEX`].
    fn macip_acl_dump(&self, acl_index: u32) -> VppResult<Vec<MacipAclDetails>>;

    /// Replaces the standard ACLs bound to an interface.
    fn acl_interface_set_acl_list(&mut self, request: &AclInterfaceSetAclList) -> VppResult<()>;

    /// Dumps the standard ACLs bound to one interface.
    fn acl_interface_list_dump(&self, sw_if_index: u32) -> VppResult<Vec<AclInterfaceListDetails>>;

    /// Binds or unbinds one MAC+IP ACL on an interface.
    fn macip_acl_interface_add_del(&mut self, request: &MacipAclInterfaceAddDel) -> VppResult<()>;

    /// Dumps the MAC+IP ACLs bound to one interface.
    fn macip_acl_interface_list_dump(
        &self,
        sw_if_index: u32,
    ) -> VppResult<Vec<MacipAclInterfaceListDetails>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_replace_constructors() {
        let create = AclAddReplace::create("web", vec![AclRule::default()]);
        assert!(create.is_create());
        assert_eq!(create.tag, "web");
        assert_eq!(create.rules.len(), 1);

        let replace = AclAddReplace::replace(3, "web", vec![]);
        assert!(!replace.is_create());
        assert_eq!(replace.acl_index, 3);
    }
}
