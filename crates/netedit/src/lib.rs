//! Validation and reconciliation engine for per-interface host network
//! configuration.
//!
//! The crate keeps an observed view of the host's interfaces fresh, lets an
//! operator edit one interface at a time, refuses edits that are incomplete
//! or malformed, and hands accepted edits to an applier as a canonical
//! request.
//!
//! # Features
//!
//! - `http` - Observation source and applier over the HTTP management API
//! - `full` - All features enabled
//!
//! # Example
//!
//! ```
//! use netedit::backend::MemoryBackend;
//! use netedit::interface::{AddressingMode, Interface};
//! use netedit::sync::Synchronizer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> netedit::Result<()> {
//!     let backend = MemoryBackend::new([
//!         Interface::new("eth0").up().manual("10.0.0.5", "255.255.255.0"),
//!     ]);
//!     let mut sync = Synchronizer::new(backend.clone(), backend.clone());
//!     sync.refresh().await?;
//!
//!     let edit = sync.select("eth0")?;
//!     edit.mode = AddressingMode::Dhcp;
//!
//!     let request = sync.submit().await?;
//!     assert!(request.dhcp);
//!     assert_eq!(sync.snapshot().get("eth0").unwrap().mode, AddressingMode::Dhcp);
//!     Ok(())
//! }
//! ```
//!
//! # Reserved interfaces
//!
//! Interfaces matching a reserved pattern (by default `enp6s0f<N>`) can be
//! observed but never edited. See [`policy::EditPolicy`].

pub mod backend;
pub mod edit;
pub mod error;
pub mod interface;
pub mod policy;
pub mod sync;
pub mod util;

// Re-export common types at crate root for convenience
pub use edit::{CanonicalRequest, PendingEdit, ValidationFailure};
pub use error::{Error, Result};
pub use interface::{AddressingMode, Interface, LinkStatus, Snapshot};
pub use policy::EditPolicy;
pub use sync::Synchronizer;
