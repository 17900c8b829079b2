//! Operator notices.
//!
//! The synchronizer reports outcomes the operator should see (refused
//! selections, validation failures, apply results) as [`Notice`]s. Delivery
//! is fire-and-forget: a notifier must not block and cannot fail the
//! operation that produced the notice.

use std::fmt;

use tokio::sync::mpsc;

use crate::edit::{Advisory, ValidationFailure};

/// Something the operator should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Selection refused by the edit policy.
    NotEditable { name: String },
    /// Selection of a name missing from the latest snapshot.
    InterfaceNotFound { name: String },
    /// Submission refused; nothing was sent.
    ValidationFailed(ValidationFailure),
    /// A non-blocking warning raised at submission.
    Advisory(Advisory),
    /// The applier accepted the request for `name`.
    Applied { name: String },
    /// The applier rejected the request; the edit is kept.
    ApplyFailed { name: String, reason: String },
    /// A poll or refresh could not observe the host.
    ObservationFailed { reason: String },
}

impl Notice {
    /// Check if this notice reports a problem.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Applied { .. } | Self::Advisory(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEditable { name } => write!(f, "Interface {} cannot be edited.", name),
            Self::InterfaceNotFound { name } => write!(f, "Interface {} not found.", name),
            Self::ValidationFailed(failure) => write!(f, "{}", failure),
            Self::Advisory(advisory) => write!(f, "{}", advisory),
            Self::Applied { name } => {
                write!(f, "Network configuration updated successfully for {}.", name)
            }
            Self::ApplyFailed { name, reason } => {
                write!(f, "Failed to update {}: {}", name, reason)
            }
            Self::ObservationFailed { reason } => {
                write!(f, "Failed to fetch network info: {}", reason)
            }
        }
    }
}

/// Receives notices from a synchronizer.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!("{}", notice);
        } else {
            tracing::info!("{}", notice);
        }
    }
}

/// Forward notices to a channel. A closed receiver drops them.
impl Notifier for mpsc::UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        let _ = self.send(notice);
    }
}
