//! Interface assignment requests and replies.
//!
//! Standard ACLs are bound to an interface as one ordered list: input
//! (ingress) ACLs first, then output (egress) ACLs, with `n_input` marking
//! the boundary. MAC+IP ACLs are bound one at a time and only on input.

use serde::{Deserialize, Serialize};

/// Request body of `acl_interface_set_acl_list`.
///
/// Replaces the whole list of the interface; an empty list unbinds every
/// standard ACL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclInterfaceSetAclList {
    pub sw_if_index: u32,
    /// Number of leading entries of `acls` applied on input.
    pub n_input: u8,
    pub acls: Vec<u32>,
}

impl AclInterfaceSetAclList {
    /// Builds the list from input and output ACL indices.
    ///
    /// Returns `None` if either list, or both together, exceed the 255
    /// entries the message can carry.
    pub fn new(sw_if_index: u32, input: &[u32], output: &[u32]) -> Option<Self> {
        let n_input = u8::try_from(input.len()).ok()?;
        u8::try_from(input.len() + output.len()).ok()?;
        Some(Self {
            sw_if_index,
            n_input,
            acls: input.iter().chain(output).copied().collect(),
        })
    }

    /// Total number of ACLs, the message's `count` field.
    pub fn count(&self) -> usize {
        self.acls.len()
    }
}

/// One entry of an `acl_interface_list_dump` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclInterfaceListDetails {
    pub sw_if_index: u32,
    pub n_input: u8,
    pub acls: Vec<u32>,
}

impl AclInterfaceListDetails {
    /// Input ACL indices. `None` if `n_input` points past the list.
    pub fn input(&self) -> Option<&[u32]> {
        self.acls.get(..usize::from(self.n_input))
    }

    /// Output ACL indices. `None` if `n_input` points past the list.
    pub fn output(&self) -> Option<&[u32]> {
        self.acls.get(usize::from(self.n_input)..)
    }
}

/// Request body of `macip_acl_interface_add_del`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacipAclInterfaceAddDel {
    pub is_add: bool,
    pub sw_if_index: u32,
    pub acl_index: u32,
}

impl MacipAclInterfaceAddDel {
    pub fn add(sw_if_index: u32, acl_index: u32) -> Self {
        Self {
            is_add: true,
            sw_if_index,
            acl_index,
        }
    }

    pub fn del(sw_if_index: u32, acl_index: u32) -> Self {
        Self {
            is_add: false,
            sw_if_index,
            acl_index,
        }
    }
}

/// One entry of a `macip_acl_interface_list_dump` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacipAclInterfaceListDetails {
    pub sw_if_index: u32,
    pub acls: Vec<u32>,
}
