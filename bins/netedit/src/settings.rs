//! Settings file.
//!
//! ```yaml
//! endpoint: http://127.0.0.1:8000/api1
//! poll_interval_secs: 5
//! timeout_secs: 10
//! reserved_patterns:
//!   - enp6s0f\d+
//! ```
//!
//! Every key is optional.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use netedit::EditPolicy;
use netedit::policy::DEFAULT_RESERVED_PATTERNS;
use netedit::sync::SyncOptions;
use serde::{Deserialize, Serialize};

/// Default management API base URL.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Management API base URL.
    pub endpoint: String,
    /// Seconds between polls in `watch`.
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Interface name patterns that may never be edited.
    pub reserved_patterns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_secs: 5,
            timeout_secs: 10,
            reserved_patterns: DEFAULT_RESERVED_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is all defaults
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn policy(&self) -> netedit::Result<EditPolicy> {
        EditPolicy::new(&self.reserved_patterns)
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::default().poll_interval(Duration::from_secs(self.poll_interval_secs.max(1)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
