//! Request diffing.
//!
//! This module computes the difference between an observed interface and a
//! canonical request, so a caller can show what an apply would change.

use std::fmt;

use super::request::CanonicalRequest;
use crate::interface::{AddressingMode, Interface};

/// One field-level change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// A value the interface does not have yet.
    Added { field: &'static str, value: String },
    /// A value the interface has that the request drops.
    Removed { field: &'static str, value: String },
    /// A value that changes.
    Changed {
        field: &'static str,
        old: String,
        new: String,
    },
}

impl FieldChange {
    /// Field this change touches.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Added { field, .. } | Self::Removed { field, .. } | Self::Changed { field, .. } => {
                field
            }
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { field, value } => write!(f, "+ {} {}", field, value),
            Self::Removed { field, value } => write!(f, "- {} {}", field, value),
            Self::Changed { field, old, new } => write!(f, "~ {} {} -> {}", field, old, new),
        }
    }
}

/// Difference between an observed interface and a request for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDiff {
    /// Interface the request targets.
    pub interface: String,
    /// Changes in display order.
    pub changes: Vec<FieldChange>,
}

impl RequestDiff {
    /// Compute the changes `request` would make to `current`.
    ///
    /// Static address and subnet are only compared when the request is in
    /// manual mode, since a DHCP request leaves them to the lease. Routes
    /// are compared entry by entry; DNS servers are compared as an ordered
    /// list.
    pub fn between(current: &Interface, request: &CanonicalRequest) -> Self {
        let mut diff = Self {
            interface: current.name.clone(),
            changes: Vec::new(),
        };

        if request.new_interface_name != current.name {
            diff.changes.push(FieldChange::Changed {
                field: "name",
                old: current.name.clone(),
                new: request.new_interface_name.clone(),
            });
        }

        let mode = if request.dhcp {
            AddressingMode::Dhcp
        } else {
            AddressingMode::Manual
        };
        if mode != current.mode {
            diff.changes.push(FieldChange::Changed {
                field: "mode",
                old: current.mode.to_string(),
                new: mode.to_string(),
            });
        }

        if !request.dhcp {
            diff.scalar("address", current.address.as_deref(), Some(&request.address));
            diff.scalar("subnet", current.subnet.as_deref(), Some(&request.subnet));
        }

        diff.scalar(
            "gateway",
            current.gateway.as_deref(),
            request.gateway.as_deref(),
        );

        if current.dns != request.dns {
            let old = current.dns.join(", ");
            let new = request.dns.join(", ");
            diff.scalar("dns", Some(&old), Some(&new));
        }

        for route in &request.routes {
            if !current.routes.contains(route) {
                diff.changes.push(FieldChange::Added {
                    field: "route",
                    value: route.clone(),
                });
            }
        }
        for route in &current.routes {
            if !request.routes.contains(route) {
                diff.changes.push(FieldChange::Removed {
                    field: "route",
                    value: route.clone(),
                });
            }
        }

        let old_metric = current.metric.map(|m| m.to_string());
        let new_metric = request.metric.map(|m| m.to_string());
        diff.scalar("metric", old_metric.as_deref(), new_metric.as_deref());

        diff
    }

    fn scalar(&mut self, field: &'static str, old: Option<&str>, new: Option<&str>) {
        let old = old.filter(|s| !s.is_empty());
        let new = new.filter(|s| !s.is_empty());
        let change = match (old, new) {
            (None, Some(new)) => FieldChange::Added {
                field,
                value: new.to_string(),
            },
            (Some(old), None) => FieldChange::Removed {
                field,
                value: old.to_string(),
            },
            (Some(old), Some(new)) if old != new => FieldChange::Changed {
                field,
                old: old.to_string(),
                new: new.to_string(),
            },
            _ => return,
        };
        self.changes.push(change);
    }

    /// Check if no changes are needed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Get the total number of changes.
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Get a human-readable summary of the changes.
    pub fn summary(&self) -> String {
        if self.changes.is_empty() {
            return "No changes needed".to_string();
        }
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
