//! Management API backend over HTTP.
//!
//! - `GET {base}/network-info?ts=<millis>` returns an observation document
//!   (see [`wire`](super::wire)).
//! - `POST {base}/update-network` takes a [`CanonicalRequest`] and replies
//!   with `{"status": "success" | ..., "message": ...}`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::wire::{self, ApplyResponse};
use super::{Applier, ObservationSource};
use crate::edit::CanonicalRequest;
use crate::error::{Error, Result};
use crate::interface::Snapshot;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Observation source and applier backed by the management API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: String,
}

impl HttpBackend {
    /// Create a backend for the API rooted at `base`, e.g.
    /// `http://127.0.0.1:8000/api1`.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("netedit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

fn cache_buster() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl ObservationSource for HttpBackend {
    async fn observe(&self) -> Result<Snapshot> {
        let url = self.url("network-info");
        debug!("Fetching network info from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("ts", cache_buster())])
            .send()
            .await
            .map_err(|e| Error::observation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::observation(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::observation(e.to_string()))?;
        wire::decode_snapshot(&body).map_err(|e| Error::observation(e.to_string()))
    }
}

impl Applier for HttpBackend {
    async fn apply(&self, request: &CanonicalRequest) -> Result<()> {
        let url = self.url("update-network");
        debug!(interface = %request.interface, "Posting update to {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::apply_failed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::apply_failed(e.to_string()))?;

        apply_outcome(status, &body)
    }
}

/// Interpret an update reply. A non-2xx status is a failure whatever the
/// body says; its message is used when the body carries one.
fn apply_outcome(status: reqwest::StatusCode, body: &str) -> Result<()> {
    let reply = serde_json::from_str::<ApplyResponse>(body);
    if !status.is_success() {
        return match reply {
            Ok(reply) if !reply.message.is_empty() => Err(Error::apply_failed(reply.message)),
            _ => Err(Error::apply_failed(format!("HTTP {}", status))),
        };
    }
    match reply {
        Ok(reply) => reply.into_result(),
        Err(e) => Err(Error::apply_failed(format!("unexpected reply: {}", e))),
    }
}
