//! State synchronization.
//!
//! The [`Synchronizer`] owns the latest observed [`Snapshot`], the
//! background poll task and the single edit [`Session`]. Outcomes the
//! operator should see are reported through a [`Notifier`].
//!
//! [`Snapshot`]: crate::interface::Snapshot
//!
//! # Example
//!
//! ```
//! use netedit::backend::MemoryBackend;
//! use netedit::interface::Interface;
//! use netedit::sync::{Notice, SessionState, Synchronizer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> netedit::Result<()> {
//! let backend = MemoryBackend::new([Interface::new("enp6s0f0").up()]);
//! let (tx, mut notices) = tokio::sync::mpsc::unbounded_channel();
//! let mut sync = Synchronizer::new(backend.clone(), backend).with_notifier(tx);
//! sync.refresh().await?;
//!
//! assert!(sync.select("enp6s0f0").is_err());
//! assert_eq!(sync.state(), SessionState::Idle);
//! assert_eq!(
//!     notices.try_recv().unwrap(),
//!     Notice::NotEditable { name: "enp6s0f0".into() }
//! );
//! # Ok(())
//! # }
//! ```

mod notice;
mod session;
mod synchronizer;

pub use notice::{LogNotifier, Notice, Notifier};
pub use session::{Session, SessionState};
pub use synchronizer::{DEFAULT_POLL_INTERVAL, SyncOptions, Synchronizer};
