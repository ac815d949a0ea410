//! ACL translation between the structured model and VPP rule records.
//!
//! # Architecture
//!
//! ```text
//! Acl / Ace (structured model)
//!        │
//!        ▼
//!    converter ──> validator
//!        │
//!        ├──> standard ──> address + protocol ──> AclRule
//!        └──> macip    ──> address            ──> MacipAclRule
//!        │
//!        ▼
//!    AclCustomizer ──> AclApi (dataplane transport)
//! ```
//!
//! # Key Components
//!
//! - [`address`]: optional IPv4/IPv6 prefixes ⇄ address bytes and length
//! - [`protocol`]: ICMP/ICMPv6/TCP/UDP/other ⇄ protocol number, port or
//!   type/code ranges and TCP flags
//! - [`standard`]: whole standard ACE ⇄ [`AclRule`](vpp_acl_api::AclRule)
//! - [`macip`]: MAC+IP ACE ⇄ [`MacipAclRule`](vpp_acl_api::MacipAclRule)
//! - [`AclContextManager`]: ACL name ⇄ dataplane index, entry names
//! - [`AclCustomizer`]: write/update/delete/read through an
//!   [`AclApi`](vpp_acl_api::AclApi), and interface assignment
//!
//! Every codec function is pure and may be called from any thread.

pub mod address;
mod context;
pub mod converter;
mod customizer;
mod error;
pub mod macip;
pub mod protocol;
pub mod standard;
mod types;
pub mod validator;

pub use context::{AclContextManager, DEFAULT_ARTIFICIAL_PREFIX};
pub use converter::AclRules;
pub use customizer::AclCustomizer;
pub use error::{AclError, Result};
pub use protocol::ProtocolFields;
pub use types::{
    Ace, AceAction, AceIpVersion, Acl, AclKind, EthMatch, IcmpRange, InterfaceAclRefs, IpVersion,
    MacIpAce, MacIpAction, MacIpL3, MacIpRule, PortRange, ProtocolSpec, StandardAce, TcpFlags,
};
