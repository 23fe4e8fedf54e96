//! Core error type.
//!
//! Sub-crates define their own error enums; `cb-sim` folds them all into
//! `SimError` via `From` impls.

use thiserror::Error;

/// Errors raised by `cb-core` primitives: `SimConfig` validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
