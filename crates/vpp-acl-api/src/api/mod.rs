//! Transport interface for the ACL plugin's binary API.
//!
//! The crate does not ship a transport. A connector to a running VPP (or a
//! test double) implements [`AclApi`]; translators only build requests and
//! read replies.
//!
//! # Available Requests
//!
//! - `acl_add_replace` / `acl_del` / `acl_dump`: standard ACLs
//! - `macip_acl_add` / `macip_acl_del` / `macip_acl_dump`: MAC+IP ACLs
//! - `acl_interface_set_acl_list` / `acl_interface_list_dump`: standard ACLs
//!   bound to an interface
//! - `macip_acl_interface_add_del` / `macip_acl_interface_list_dump`: MAC+IP
//!   ACLs bound to an interface

pub mod acl;
pub mod interface;

pub use acl::{AclAddReplace, AclApi, AclDetails, MacipAclAdd, MacipAclDetails, NEW_ACL_INDEX};
pub use interface::{
    AclInterfaceListDetails, AclInterfaceSetAclList, MacipAclInterfaceAddDel,
    MacipAclInterfaceListDetails,
};
