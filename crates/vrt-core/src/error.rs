//! Toolkit-level error surface
//!
//! Failures in this toolkit fall into categories with very different
//! handling: a malformed benchmark file or a structurally invalid instance
//! is fatal at load time, while a pricing or master-problem failure aborts
//! one solve and leaves the process healthy. [`VrtError`] is the boundary
//! type applications match on; the algorithm and loading crates keep their
//! own precise error enums internally and convert into these categories at
//! the public surface.

use thiserror::Error;

use crate::instance::InstanceError;

/// Boundary error of the VRT toolkit.
#[derive(Error, Debug)]
pub enum VrtError {
    /// Reading an instance or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A benchmark file could not be parsed (missing VEHICLE/CUSTOMER
    /// sections, short or non-numeric rows).
    #[error("malformed input: {0}")]
    InputMalformed(String),

    /// The assembled instance violates a structural invariant (bad node
    /// count, reversed window, arc into the start depot, ...).
    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),

    /// The pricing subproblem failed, or proved that no depot-to-depot
    /// route exists at all.
    #[error("pricing failed: {0}")]
    Pricing(String),

    /// The restricted master LP reported infeasibility, unboundedness, or a
    /// backend failure.
    #[error("master problem failed: {0}")]
    Master(String),

    /// A configuration file or option was rejected.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for toolkit-boundary results.
pub type VrtResult<T> = Result<T, VrtError>;

// Parser errors arrive as anyhow chains from the loading layer; flatten the
// chain so the context trail survives in the message.
impl From<anyhow::Error> for VrtError {
    fn from(err: anyhow::Error) -> Self {
        VrtError::InputMalformed(format!("{err:#}"))
    }
}
