//! # croft-access
//!
//! Capability-based access control for privileged farm operations.
//!
//! Permission checking is a pluggable seam: the engine consults any
//! [`CapabilityCheck`] backend. [`grants::RoleGrants`] is the in-memory
//! backend used in v1.
//!
//! ## Modules
//!
//! - [`grants`] — In-memory capability grants

pub mod grants;

pub use croft_types::traits::{Capability, CapabilityCheck};

/// Error types for access control.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The caller does not hold the required capability.
    #[error("account {account} is missing capability {capability:?}")]
    Unauthorized {
        /// Hex-encoded address of the rejected caller.
        account: String,
        /// The capability the operation requires.
        capability: Capability,
    },
}

/// Convenience result type for access-control operations.
pub type Result<T> = std::result::Result<T, AccessError>;
