//! The single edit session.
//!
//! ```text
//!  Idle --select--> Editing --submit(valid)--> Applying --ok--> Idle
//!   ^                 |  ^                        |
//!   +-----cancel------+  +--------failure---------+
//! ```
//!
//! A failed validation leaves the session in `Editing` without reaching
//! `Applying`. Errors never disturb the current edit.

use std::fmt;

use tracing::debug;

use crate::edit::{CanonicalRequest, PendingEdit};
use crate::error::{Error, Result};
use crate::interface::Snapshot;
use crate::policy::EditPolicy;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Editing,
    Applying,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Applying => "applying",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operator edit session: at most one pending edit at a time.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    edit: Option<PendingEdit>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The pending edit, while Editing or Applying.
    pub fn pending(&self) -> Option<&PendingEdit> {
        self.edit.as_ref()
    }

    /// Mutable access to the pending edit. Only available while Editing.
    pub fn edit_mut(&mut self) -> Option<&mut PendingEdit> {
        match self.state {
            SessionState::Editing => self.edit.as_mut(),
            _ => None,
        }
    }

    /// Start editing `name`, seeded from its record in `snapshot`.
    ///
    /// Selecting while Editing discards the current edit and starts over.
    pub fn select(
        &mut self,
        name: &str,
        snapshot: &Snapshot,
        policy: &EditPolicy,
    ) -> Result<&mut PendingEdit> {
        self.ensure_not_applying("select")?;
        policy.check(name)?;
        let observed = snapshot.get(name).ok_or_else(|| Error::InterfaceNotFound {
            name: name.to_string(),
        })?;

        debug!(interface = name, from = %self.state, "session editing");
        self.state = SessionState::Editing;
        Ok(self.edit.insert(PendingEdit::seed(observed)))
    }

    /// Discard the pending edit.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_not_applying("cancel")?;
        if self.edit.take().is_some() {
            debug!("session cancelled");
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Validate the pending edit and move to Applying.
    ///
    /// On a validation failure the session stays in Editing.
    pub fn begin_submit(&mut self) -> Result<CanonicalRequest> {
        let edit = match (self.state, &self.edit) {
            (SessionState::Editing, Some(edit)) => edit,
            (state, _) => {
                return Err(Error::InvalidState {
                    operation: "submit",
                    state: state.as_str(),
                });
            }
        };

        let request = edit.validate()?;
        debug!(interface = %request.interface, "session applying");
        self.state = SessionState::Applying;
        Ok(request)
    }

    /// Record the apply outcome.
    ///
    /// Success ends the session; failure returns to Editing with the edit
    /// kept so the operator can correct and resubmit.
    pub fn finish_apply(&mut self, applied: bool) {
        if self.state != SessionState::Applying {
            return;
        }
        if applied {
            debug!("session idle after apply");
            self.edit = None;
            self.state = SessionState::Idle;
        } else {
            debug!("session back to editing after failed apply");
            self.state = SessionState::Editing;
        }
    }

    fn ensure_not_applying(&self, operation: &'static str) -> Result<()> {
        if self.state == SessionState::Applying {
            return Err(Error::InvalidState {
                operation,
                state: self.state.as_str(),
            });
        }
        Ok(())
    }
}
