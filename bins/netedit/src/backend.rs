//! Backend selection.

use std::path::Path;

use anyhow::Context as _;
use netedit::CanonicalRequest;
use netedit::Snapshot;
use netedit::backend::{Applier, HttpBackend, MemoryBackend, ObservationSource};

use crate::settings::Settings;

/// The management API, or a saved document for offline runs.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryBackend),
    Http(HttpBackend),
}

impl Backend {
    pub fn open(settings: &Settings, snapshot: Option<&Path>) -> anyhow::Result<Self> {
        match snapshot {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let backend = MemoryBackend::from_wire(&json)
                    .with_context(|| format!("invalid network-info document {}", path.display()))?;
                Ok(Self::Memory(backend))
            }
            None => Ok(Self::Http(HttpBackend::new(
                &settings.endpoint,
                settings.timeout(),
            )?)),
        }
    }
}

impl ObservationSource for Backend {
    async fn observe(&self) -> netedit::Result<Snapshot> {
        match self {
            Self::Memory(backend) => backend.observe().await,
            Self::Http(backend) => backend.observe().await,
        }
    }
}

impl Applier for Backend {
    async fn apply(&self, request: &CanonicalRequest) -> netedit::Result<()> {
        match self {
            Self::Memory(backend) => backend.apply(request).await,
            Self::Http(backend) => backend.apply(request).await,
        }
    }
}
