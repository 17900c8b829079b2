//! Wire model of the management API.
//!
//! Observation document:
//!
//! ```json
//! {"network_info": {
//!     "eth0": {"Status": "Up", "DHCP Status": "Manual",
//!              "IP Address": "10.0.0.5", "Subnet Mask": "255.255.255.0",
//!              "Gateway": "10.0.0.1", "DNS": ["8.8.8.8"],
//!              "Routes": [{"to": "192.168.0.0/16"}], "Metric": 100}}}
//! ```
//!
//! Every record field is optional, and `null` counts as absent. Empty
//! strings count as absent too. `DNS` may be a list or a comma-separated
//! string, and `Metric` a number or a string; a metric that is not a `u32`
//! is dropped rather than failing the whole document.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::edit::split_list;
use crate::error::{Error, Result};
use crate::interface::{AddressingMode, Interface, LinkStatus, Snapshot};

#[derive(Debug, Deserialize)]
struct NetworkInfo {
    network_info: BTreeMap<String, WireInterface>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireInterface {
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "DHCP Status")]
    dhcp_status: Option<String>,
    #[serde(rename = "IP Address")]
    address: Option<String>,
    #[serde(rename = "Subnet Mask")]
    subnet: Option<String>,
    #[serde(rename = "Gateway")]
    gateway: Option<String>,
    #[serde(rename = "DNS")]
    dns: Option<WireDns>,
    #[serde(rename = "Routes")]
    routes: Option<Vec<WireRoute>>,
    #[serde(rename = "Metric")]
    metric: Option<WireMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireDns {
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct WireRoute {
    to: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireMetric {
    Number(serde_json::Number),
    Text(String),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WireInterface {
    fn into_interface(self, name: String) -> Interface {
        let dns = match self.dns {
            Some(WireDns::List(servers)) => servers
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
            Some(WireDns::Text(text)) => split_list(&text),
            None => Vec::new(),
        };
        let metric = match self.metric {
            Some(WireMetric::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(WireMetric::Text(text)) => text.trim().parse().ok(),
            None => None,
        };

        Interface {
            name,
            status: LinkStatus::from_label(self.status.as_deref().unwrap_or_default()),
            mode: AddressingMode::from_label(self.dhcp_status.as_deref().unwrap_or_default()),
            address: non_empty(self.address),
            subnet: non_empty(self.subnet),
            gateway: non_empty(self.gateway),
            dns,
            routes: self
                .routes
                .unwrap_or_default()
                .into_iter()
                .map(|r| r.to)
                .filter(|to| !to.trim().is_empty())
                .collect(),
            metric,
        }
    }
}

/// Decode an observation document into a snapshot taken now.
pub fn decode_snapshot(json: &str) -> Result<Snapshot> {
    let info: NetworkInfo = serde_json::from_str(json)?;
    Ok(info
        .network_info
        .into_iter()
        .map(|(name, record)| record.into_interface(name))
        .collect())
}

/// Reply to an update request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplyResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ApplyResponse {
    /// `Ok` when the backend reported `success`, otherwise an apply
    /// failure carrying its message.
    pub fn into_result(self) -> Result<()> {
        if self.status == "success" {
            Ok(())
        } else if self.message.is_empty() {
            Err(Error::apply_failed(format!("status {}", self.status)))
        } else {
            Err(Error::apply_failed(self.message))
        }
    }
}
