//! In-process backend.
//!
//! Keeps interface records in memory and applies canonical requests to
//! them directly. Used by tests and by offline dry runs against a saved
//! observation document.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::{Applier, ObservationSource, wire};
use crate::edit::CanonicalRequest;
use crate::error::{Error, Result};
use crate::interface::{AddressingMode, Interface, Snapshot};

#[derive(Debug, Default)]
struct State {
    interfaces: BTreeMap<String, Interface>,
    observations: usize,
    applied: Vec<CanonicalRequest>,
    reject_next: Option<String>,
    observe_failure: Option<String>,
}

/// Shared in-memory observation source and applier.
///
/// Clones share state, so one clone can be handed to a synchronizer while
/// another inspects or steers it.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new(interfaces: impl IntoIterator<Item = Interface>) -> Self {
        let state = State {
            interfaces: interfaces
                .into_iter()
                .map(|iface| (iface.name.clone(), iface))
                .collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Load from an observation document.
    pub fn from_wire(json: &str) -> Result<Self> {
        let snapshot = wire::decode_snapshot(json)?;
        Ok(Self::new(snapshot.iter().cloned()))
    }

    /// Replace or add one record, as if the host changed underneath.
    pub async fn set_interface(&self, interface: Interface) {
        let mut state = self.state.lock().await;
        state.interfaces.insert(interface.name.clone(), interface);
    }

    /// Current record for `name`.
    pub async fn interface(&self, name: &str) -> Option<Interface> {
        self.state.lock().await.interfaces.get(name).cloned()
    }

    /// Number of completed `observe` calls, failed ones included.
    pub async fn observations(&self) -> usize {
        self.state.lock().await.observations
    }

    /// Requests accepted so far, oldest first.
    pub async fn applied(&self) -> Vec<CanonicalRequest> {
        self.state.lock().await.applied.clone()
    }

    /// Make the next `apply` fail with `reason`.
    pub async fn reject_next_apply(&self, reason: impl Into<String>) {
        self.state.lock().await.reject_next = Some(reason.into());
    }

    /// Make every `observe` fail with `reason` until cleared with `None`.
    pub async fn set_observe_failure(&self, reason: Option<&str>) {
        self.state.lock().await.observe_failure = reason.map(str::to_string);
    }
}

impl ObservationSource for MemoryBackend {
    async fn observe(&self) -> Result<Snapshot> {
        let mut state = self.state.lock().await;
        state.observations += 1;
        if let Some(reason) = &state.observe_failure {
            return Err(Error::observation(reason.clone()));
        }
        Ok(Snapshot::new(state.interfaces.values().cloned()))
    }
}

impl Applier for MemoryBackend {
    async fn apply(&self, request: &CanonicalRequest) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(reason) = state.reject_next.take() {
            return Err(Error::apply_failed(reason));
        }

        if request.is_rename() && state.interfaces.contains_key(&request.new_interface_name) {
            return Err(Error::apply_failed(format!(
                "interface {} already exists",
                request.new_interface_name
            )));
        }
        let Some(mut iface) = state.interfaces.remove(&request.interface) else {
            return Err(Error::apply_failed(format!(
                "interface {} not found",
                request.interface
            )));
        };

        iface.name = request.new_interface_name.clone();
        if request.dhcp {
            iface.mode = AddressingMode::Dhcp;
            iface.address = None;
            iface.subnet = None;
        } else {
            iface.mode = AddressingMode::Manual;
            iface.address = Some(request.address.clone());
            iface.subnet = Some(request.subnet.clone());
        }
        iface.gateway = request.gateway.clone();
        iface.dns = request.dns.clone();
        iface.routes = request.routes.clone();
        iface.metric = request.metric;

        debug!(interface = %iface.name, "memory backend applied request");
        state.interfaces.insert(iface.name.clone(), iface);
        state.applied.push(request.clone());
        Ok(())
    }
}
