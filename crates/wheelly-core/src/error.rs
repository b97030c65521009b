//! Core error type.
//!
//! Sub-crates define their own error enums for crate-local failure modes and
//! convert into `CoreError` via `From`, or wrap `CoreError` as one variant.
//! Both patterns appear in this workspace; prefer whichever keeps error sites
//! closest to the call that produced the failure.

use thiserror::Error;

/// The shared error type for `wheelly-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("state {0} not found")]
    StateNotFound(crate::StateId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `wheelly-core`.
pub type CoreResult<T> = Result<T, CoreError>;
