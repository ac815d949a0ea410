//! hc2vpp-acl - ACL translation for the VPP ACL plugin.
//!
//! Translates access control lists between a structured model (named ACLs
//! of standard or MAC+IP entries) and the fixed-layout rule records of the
//! VPP ACL plugin, in both directions.
//!
//! # Example
//!
//! ```ignore
//! use hc2vpp_acl::acl::{standard, AceAction, StandardAce};
//!
//! let ace = StandardAce {
//!     name: "deny-all".to_string(),
//!     ip_version: None,
//!     protocol: None,
//!     action: AceAction::Deny,
//! };
//! let rule = standard::encode(&ace)?;
//! assert_eq!(rule.proto, 0);
//! ```

pub mod acl;
pub mod config;

pub use acl::{AclCustomizer, AclError, Result};
pub use config::TranslatorConfig;
