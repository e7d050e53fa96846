//! Debounce configuration
//!
//! Loaded from the embedding application's TOML config, e.g.
//!
//! ```toml
//! window_ms = 250
//! label = "search"
//! ```

use crate::error::DebounceError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest accepted window (1 minute)
pub const MAX_WINDOW_MS: u64 = 60_000;

/// Debouncer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet window in milliseconds (default: 500)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Name attached to log lines from this debouncer
    #[serde(default)]
    pub label: Option<String>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            label: None,
        }
    }
}

impl DebounceConfig {
    /// Config with the given window and no label
    ///
    /// Windows beyond `u64::MAX` milliseconds saturate to `u64::MAX`;
    /// [`validate`](Self::validate) rejects them like any other window over
    /// [`MAX_WINDOW_MS`].
    pub fn with_window(window: Duration) -> Self {
        Self {
            window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            label: None,
        }
    }

    /// Window as a duration
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Check value ranges
    pub fn validate(&self) -> std::result::Result<(), DebounceError> {
        if self.window_ms > MAX_WINDOW_MS {
            return Err(DebounceError::InvalidWindow {
                window_ms: self.window_ms,
                max_ms: MAX_WINDOW_MS,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .context("Failed to parse debounce config")?;
        config.validate()
            .context("Invalid debounce config")?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
    }
}

fn default_window_ms() -> u64 {
    500
}
