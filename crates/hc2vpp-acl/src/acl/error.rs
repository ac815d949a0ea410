//! ACL translation errors.

use thiserror::Error;
use vpp_acl_api::VppError;

/// Error type for ACL translation and dataplane writes.
///
/// The translation kinds are deterministic: repeating the same input
/// reproduces the same failure, so none of them is retryable.
#[derive(Debug, Error)]
pub enum AclError {
    /// The protocol node is not one of ICMP, ICMPv6, TCP, UDP or a raw number.
    #[error("Unsupported IP protocol {protocol} in ACE {ace}")]
    UnsupportedProtocol { protocol: String, ace: String },

    /// The action is not allowed for this kind of rule.
    #[error("Unsupported packet-handling action {action} for ACE {ace}")]
    UnsupportedAction { action: String, ace: String },

    /// A required field is missing or out of range.
    #[error("Malformed rule {ace}: {reason}")]
    MalformedRule { ace: String, reason: String },

    /// The ACL as a whole cannot be written, updated or deleted.
    #[error("Invalid ACL {acl}: {reason}")]
    Validation { acl: String, reason: String },

    /// No index or name is stored for an ACL.
    #[error("No mapping stored for ACL {0}")]
    NotMapped(String),

    #[error(transparent)]
    Dataplane(#[from] VppError),
}

impl AclError {
    pub fn unsupported_protocol(protocol: impl Into<String>) -> Self {
        Self::UnsupportedProtocol {
            protocol: protocol.into(),
            ace: String::new(),
        }
    }

    pub fn unsupported_action(action: impl Into<String>, ace: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
            ace: ace.into(),
        }
    }

    pub fn malformed(ace: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRule {
            ace: ace.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(acl: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            acl: acl.into(),
            reason: reason.into(),
        }
    }

    /// Names the rule an error belongs to, unless it is already named.
    ///
    /// Field codecs do not know which rule they are working on; the caller
    /// attaches the identifier on the way out.
    pub fn for_ace(self, name: impl Into<String>) -> Self {
        match self {
            Self::UnsupportedProtocol { protocol, ace } if ace.is_empty() => {
                Self::UnsupportedProtocol {
                    protocol,
                    ace: name.into(),
                }
            }
            Self::UnsupportedAction { action, ace } if ace.is_empty() => Self::UnsupportedAction {
                action,
                ace: name.into(),
            },
            Self::MalformedRule { ace, reason } if ace.is_empty() => Self::MalformedRule {
                ace: name.into(),
                reason,
            },
            other => other,
        }
    }

    /// Returns true for failures of the translation itself, as opposed to
    /// validation or dataplane failures.
    pub fn is_translation_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProtocol { .. }
                | Self::UnsupportedAction { .. }
                | Self::MalformedRule { .. }
        )
    }
}

/// Result type alias for ACL operations.
pub type Result<T> = std::result::Result<T, AclError>;
