//! Error types for the boxpack core.

use thiserror::Error;

/// Errors raised by container, item and state operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The container dimensions are unusable (e.g. a zero axis).
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// An item's dimensions are unusable.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// A move's target space or item no longer exists in the state.
    ///
    /// Applying a placement whose space has already been consumed (or whose
    /// item is no longer pending) is a caller bug; it is surfaced here
    /// instead of silently returning the unmodified state.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for boxpack operations.
pub type Result<T> = std::result::Result<T, Error>;
