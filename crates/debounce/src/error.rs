//! Errors raised by the debouncer itself
//!
//! Failures of the wrapped action are not listed here: they keep the
//! action's own error type.

use thiserror::Error;

/// Debouncer setup errors
#[derive(Debug, Error)]
pub enum DebounceError {
    /// No tokio runtime was available to drive the trailing timer
    #[error("Debouncer must be created from within a tokio runtime")]
    NoRuntime,

    /// Configured window is outside the accepted range
    #[error("Invalid debounce window: {window_ms}ms (must be at most {max_ms}ms)")]
    InvalidWindow { window_ms: u64, max_ms: u64 },
}
