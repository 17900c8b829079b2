//! Observation sources and appliers.
//!
//! The synchronizer only talks to the host through these two traits:
//! [`ObservationSource`] produces full snapshots and [`Applier`] carries out
//! canonical requests. [`MemoryBackend`] implements both over in-process
//! state; `HttpBackend` (feature `http`) implements both over the
//! management API.

use std::future::Future;

use crate::edit::CanonicalRequest;
use crate::error::Result;
use crate::interface::Snapshot;

mod memory;
pub mod wire;

#[cfg(feature = "http")]
mod http;

pub use memory::MemoryBackend;

#[cfg(feature = "http")]
pub use http::HttpBackend;

/// Produces a full snapshot of the host's interfaces on demand.
pub trait ObservationSource: Send + Sync + 'static {
    /// Observe every interface. Failures are reported as
    /// [`Error::ObservationFailed`](crate::Error::ObservationFailed).
    fn observe(&self) -> impl Future<Output = Result<Snapshot>> + Send;
}

/// Carries out a canonical request against the host.
pub trait Applier: Send + Sync {
    /// Apply `request`. A rejection is reported as
    /// [`Error::ApplyFailed`](crate::Error::ApplyFailed) with the
    /// backend's reason.
    fn apply(&self, request: &CanonicalRequest) -> impl Future<Output = Result<()>> + Send;
}
