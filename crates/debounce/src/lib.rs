//! Debounced invocation for bursty callers
//!
//! This crate provides a leading/trailing debouncer:
//! - The first call of a burst runs the action immediately
//! - Follow-up calls inside the window collapse into one trailing run
//! - The trailing run always sees the most recent arguments
//! - Calls landing near the deadline push the trailing run back

pub mod config;
pub mod debounce;
pub mod error;

// Re-exports
pub use config::DebounceConfig;
pub use debounce::{wrap, Debouncer, Phase};
pub use error::DebounceError;
