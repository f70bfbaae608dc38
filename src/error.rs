//! Error types for StrataLSM
//!
//! Provides a unified error type for all operations.
//!
//! There is exactly one failure mode in this crate: rejecting an invalid
//! configuration at construction time. Every data-path operation (`put`,
//! `delete`, `get`, `contains`, `get_all`, `range`, `clear`) is infallible,
//! and a missing key is an absent `Option`, never an error.

use thiserror::Error;

/// Result type alias using StrataError
pub type Result<T> = std::result::Result<T, StrataError>;

/// Unified error type for StrataLSM operations
#[derive(Debug, Error)]
pub enum StrataError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
