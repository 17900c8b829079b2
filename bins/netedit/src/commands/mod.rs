//! Command implementations.

pub mod edit;
pub mod show;
pub mod watch;

use netedit::Synchronizer;
use netedit::sync::Notice;
use tokio::sync::mpsc;

use crate::backend::Backend;

/// Shared state handed to every command.
pub struct Context {
    pub sync: Synchronizer<Backend, Backend>,
    pub notices: mpsc::UnboundedReceiver<Notice>,
    pub json: bool,
}

impl Context {
    /// Notices delivered since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

/// Placeholder for absent values in text output.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
