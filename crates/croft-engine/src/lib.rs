//! # croft-engine
//!
//! The distribution engine for the Croft staking farm: the finite reward
//! pool, proportional share computation with deterministic remainder
//! handling, engine configuration, and the [`Farm`](farm::Farm) facade
//! wiring the staker registry and the collaborator seams together.
//!
//! ## Modules
//!
//! - [`config`] — Engine configuration
//! - [`distribution`] — Proportional share computation
//! - [`farm`] — The farm facade
//! - [`pool`] — Finite reward pool
//! - [`vault`] — In-memory base-asset vault

pub mod config;
pub mod distribution;
pub mod farm;
pub mod pool;
pub mod vault;

use croft_access::AccessError;
use croft_registry::RegistryError;
use croft_types::traits::TransferError;

/// Error types for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Distribution attempted with an empty staker set.
    #[error("no stakers to distribute rewards to")]
    NoStakers,

    /// Distribution attempted after the pool was fully allocated.
    #[error("reward pool exhausted")]
    PoolExhausted,

    /// Engine configuration failed validation.
    #[error("invalid farm config: {0}")]
    InvalidConfig(String),

    /// Arithmetic overflow in reward computation.
    #[error("arithmetic overflow in reward computation")]
    Overflow,

    /// A registry precondition failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The caller lacks a required capability.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// An asset-moving collaborator failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
