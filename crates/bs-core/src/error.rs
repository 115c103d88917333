//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a
//! coordinate check bubbles up through them.

use thiserror::Error;

/// Errors produced by `bs-core` constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

/// Shorthand result type for `bs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
