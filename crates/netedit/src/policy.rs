//! Interface editability policy.
//!
//! Some interfaces carry the operator's own access to the host (the
//! physical uplink) and must never be reconfigured from here. The policy is
//! a static predicate over the interface name; it does not look at observed
//! state.
//!
//! # Example
//!
//! ```
//! use netedit::policy::EditPolicy;
//!
//! let policy = EditPolicy::default();
//! assert!(!policy.is_editable("enp6s0f0"));
//! assert!(policy.is_editable("eth0"));
//!
//! let policy = EditPolicy::new(["eno\\d+", "mgmt0"]).unwrap();
//! assert!(!policy.is_editable("eno1"));
//! assert!(policy.is_editable("enp6s0f0"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Names reserved by the default policy: the uplink NIC ports.
pub const DEFAULT_RESERVED_PATTERNS: &[&str] = &[r"enp6s0f\d+"];

static DEFAULT_POLICY: LazyLock<EditPolicy> = LazyLock::new(EditPolicy::default);

/// Decides which interfaces may be reconfigured.
///
/// Each pattern is a regular expression matched against the *whole*
/// interface name.
#[derive(Debug, Clone)]
pub struct EditPolicy {
    reserved: Vec<(String, Regex)>,
}

impl EditPolicy {
    /// Build a policy from reserved name patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref().to_string();
                Regex::new(&format!("^(?:{})$", pattern))
                    .map(|re| (pattern.clone(), re))
                    .map_err(|source| Error::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { reserved })
    }

    /// A policy that reserves nothing.
    pub fn permissive() -> Self {
        Self {
            reserved: Vec::new(),
        }
    }

    /// Check whether `name` may be edited.
    pub fn is_editable(&self, name: &str) -> bool {
        !self.reserved.iter().any(|(_, re)| re.is_match(name))
    }

    /// Like [`is_editable`](Self::is_editable), as a `Result`.
    pub fn check(&self, name: &str) -> Result<()> {
        if self.is_editable(name) {
            Ok(())
        } else {
            Err(Error::NotEditable {
                name: name.to_string(),
            })
        }
    }

    /// The reserved patterns, as given.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.reserved.iter().map(|(p, _)| p.as_str())
    }
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_PATTERNS).expect("default reserved patterns compile")
    }
}

/// Check a name against the default policy.
pub fn is_editable(name: &str) -> bool {
    DEFAULT_POLICY.is_editable(name)
}
