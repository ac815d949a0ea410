//! Dataplane return values and transport error handling.
//!
//! Every VPP reply carries a signed `retval`. Zero means success; negative
//! values come from the `vnet_api_error_t` table. This module turns those
//! codes into Rust's `Result` type.

use std::fmt;
use thiserror::Error;

/// Return values reported by the VPP binary API.
///
/// Only the codes the ACL plugin actually produces get their own variant;
/// everything else is kept verbatim in [`VppRetval::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VppRetval {
    Success,
    Unspecified,
    InvalidSwIfIndex,
    NoSuchEntry,
    InvalidValue,
    Unimplemented,
    Other(i32),
}

impl VppRetval {
    /// Creates a VppRetval from a raw reply value.
    pub fn from_raw(retval: i32) -> Self {
        match retval {
            0 => VppRetval::Success,
            -1 => VppRetval::Unspecified,
            -2 => VppRetval::InvalidSwIfIndex,
            -6 => VppRetval::NoSuchEntry,
            -7 => VppRetval::InvalidValue,
            -9 => VppRetval::Unimplemented,
            other => VppRetval::Other(other),
        }
    }

    /// Returns the raw reply value.
    pub fn as_raw(&self) -> i32 {
        match self {
            VppRetval::Success => 0,
            VppRetval::Unspecified => -1,
            VppRetval::InvalidSwIfIndex => -2,
            VppRetval::NoSuchEntry => -6,
            VppRetval::InvalidValue => -7,
            VppRetval::Unimplemented => -9,
            VppRetval::Other(raw) => *raw,
        }
    }

    /// Returns true if the reply indicates success.
    pub fn is_success(&self) -> bool {
        *self == VppRetval::Success
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self, request: &str) -> VppResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            log::debug!("{} failed with retval {}", request, self.as_raw());
            Err(VppError::Retval {
                request: request.to_string(),
                retval: self,
            })
        }
    }
}

impl fmt::Display for VppRetval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VppRetval::Success => write!(f, "SUCCESS"),
            VppRetval::Unspecified => write!(f, "UNSPECIFIED"),
            VppRetval::InvalidSwIfIndex => write!(f, "INVALID_SW_IF_INDEX"),
            VppRetval::NoSuchEntry => write!(f, "NO_SUCH_ENTRY"),
            VppRetval::InvalidValue => write!(f, "INVALID_VALUE"),
            VppRetval::Unimplemented => write!(f, "UNIMPLEMENTED"),
            VppRetval::Other(raw) => write!(f, "RETVAL({})", raw),
        }
    }
}

/// Error type for calls through the dataplane transport.
#[derive(Debug, Clone, Error)]
pub enum VppError {
    /// The dataplane answered with a non-zero return value.
    #[error("{request} failed: {retval}")]
    Retval { request: String, retval: VppRetval },

    /// No reply arrived in time.
    #[error("{request} timed out after {timeout_ms} ms")]
    Timeout { request: String, timeout_ms: u64 },

    /// The connection to the dataplane is gone.
    #[error("not connected to VPP")]
    Disconnected,

    /// The reply could not be interpreted.
    #[error("invalid reply to {request}: {message}")]
    InvalidReply { request: String, message: String },
}

impl VppError {
    /// Creates a timeout error.
    pub fn timeout(request: impl Into<String>, timeout_ms: u64) -> Self {
        VppError::Timeout {
            request: request.into(),
            timeout_ms,
        }
    }

    /// Creates an invalid reply error.
    pub fn invalid_reply(request: impl Into<String>, message: impl Into<String>) -> Self {
        VppError::InvalidReply {
            request: request.into(),
            message: message.into(),
        }
    }

    /// Returns the dataplane return value if this is a Retval error.
    pub fn retval(&self) -> Option<VppRetval> {
        match self {
            VppError::Retval { retval, .. } => Some(*retval),
            _ => None,
        }
    }
}

/// Result type for dataplane calls.
pub type VppResult<T> = Result<T, VppError>;
