//! Binary records and transport interface for the VPP ACL plugin.
//!
//! The dataplane's control API exchanges fixed-layout records. This crate
//! mirrors those records field-for-field so that translators can fill and
//! read them without knowing anything about the transport that carries them.
//!
//! # Architecture
//!
//! - [`types`]: the `AclRule` / `MacipAclRule` records and protocol constants
//! - [`error`]: dataplane return values and transport errors
//! - [`api`]: the [`AclApi`] trait implemented by a transport
//!
//! # Example
//!
//! ```ignore
//! use vpp_acl_api::{AclAddReplace, AclApi, AclRule, VppResult};
//!
//! fn install(api: &mut impl AclApi, rules: Vec<AclRule>) -> VppResult<u32> {
//!     api.acl_add_replace(&AclAddReplace::create("web", rules))
//! }
//! ```

pub mod api;
pub mod error;
pub mod types;

pub use api::{
    AclAddReplace, AclApi, AclDetails, AclInterfaceListDetails, AclInterfaceSetAclList,
    MacipAclAdd, MacipAclDetails, MacipAclInterfaceAddDel, MacipAclInterfaceListDetails,
    NEW_ACL_INDEX,
};
pub use error::{VppError, VppResult, VppRetval};
pub use types::{AclRule, MacipAclRule};
