//! The canonical change request handed to the applier.

use serde::{Deserialize, Serialize};

/// A normalized, validated configuration change for one interface.
///
/// Serializes to the applier's wire form:
///
/// ```json
/// {"interface": "eth0", "new_interface_name": "eth0", "ip": "10.0.0.5",
///  "subnet": "255.255.255.0", "gateway": null, "dns": [], "dhcp": false,
///  "routes": [], "metric": null}
/// ```
///
/// `gateway: None` means the interface ends up with no gateway; an
/// applier must remove one that is currently configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    /// Interface being changed, by its current name.
    pub interface: String,
    /// Name the interface should carry afterwards.
    pub new_interface_name: String,
    /// Static address; empty in DHCP mode.
    #[serde(rename = "ip")]
    pub address: String,
    /// Static subnet; empty in DHCP mode.
    pub subnet: String,
    pub gateway: Option<String>,
    pub dns: Vec<String>,
    pub dhcp: bool,
    pub routes: Vec<String>,
    pub metric: Option<u32>,
}

impl CanonicalRequest {
    /// Check if the request renames the interface.
    pub fn is_rename(&self) -> bool {
        self.interface != self.new_interface_name
    }

    /// Encode as the applier's JSON body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
