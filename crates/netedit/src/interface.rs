//! Observed interface state.
//!
//! An [`Interface`] is one record of an observation; a [`Snapshot`] is a
//! full observation of every interface. Snapshots are replaced wholesale
//! on each poll, never patched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;

/// Link status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LinkStatus {
    Up,
    #[default]
    Down,
}

impl LinkStatus {
    /// Map a backend status label. Anything other than `Up` is down.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("up") {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn is_up(&self) -> bool {
        *self == Self::Up
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
        }
    }
}

/// How an interface gets its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AddressingMode {
    #[default]
    #[serde(rename = "DHCP")]
    Dhcp,
    Manual,
}

impl AddressingMode {
    /// Map a backend mode label. Only the exact label `DHCP` means DHCP.
    pub fn from_label(label: &str) -> Self {
        if label == "DHCP" {
            Self::Dhcp
        } else {
            Self::Manual
        }
    }

    pub fn is_dhcp(&self) -> bool {
        *self == Self::Dhcp
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dhcp => f.write_str("DHCP"),
            Self::Manual => f.write_str("Manual"),
        }
    }
}

impl FromStr for AddressingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dhcp" => Ok(Self::Dhcp),
            "manual" | "static" => Ok(Self::Manual),
            _ => Err(format!("unknown addressing mode: {}", s)),
        }
    }
}

/// One observed network interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Interface {
    pub name: String,
    pub status: LinkStatus,
    pub mode: AddressingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<u32>,
}

impl Interface {
    /// Create a down, DHCP-addressed interface with nothing else set.
    ///
    /// # Example
    ///
    /// ```
    /// use netedit::interface::{AddressingMode, Interface};
    ///
    /// let eth0 = Interface::new("eth0")
    ///     .up()
    ///     .manual("10.0.0.5", "255.255.255.0")
    ///     .gateway("10.0.0.1")
    ///     .route("192.168.0.0/16")
    ///     .dns(["1.1.1.1"]);
    ///
    /// assert_eq!(eth0.mode, AddressingMode::Manual);
    /// assert_eq!(eth0.routes, ["192.168.0.0/16"]);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the link up.
    pub fn up(mut self) -> Self {
        self.status = LinkStatus::Up;
        self
    }

    /// Set the link down.
    pub fn down(mut self) -> Self {
        self.status = LinkStatus::Down;
        self
    }

    /// Use DHCP with the given leased address, if any.
    pub fn dhcp(mut self, leased: Option<(&str, &str)>) -> Self {
        self.mode = AddressingMode::Dhcp;
        if let Some((address, subnet)) = leased {
            self.address = Some(address.to_string());
            self.subnet = Some(subnet.to_string());
        }
        self
    }

    /// Use a static address.
    pub fn manual(mut self, address: &str, subnet: &str) -> Self {
        self.mode = AddressingMode::Manual;
        self.address = Some(address.to_string());
        self.subnet = Some(subnet.to_string());
        self
    }

    /// Set the gateway.
    pub fn gateway(mut self, gateway: &str) -> Self {
        self.gateway = Some(gateway.to_string());
        self
    }

    /// Append a route destination.
    pub fn route(mut self, destination: &str) -> Self {
        self.routes.push(destination.to_string());
        self
    }

    /// Replace the DNS servers.
    pub fn dns<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dns = servers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default route metric.
    pub fn metric(mut self, metric: u32) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// One full observation of the host's interfaces, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    interfaces: BTreeMap<String, Interface>,
    observed_at: Option<Instant>,
}

impl Snapshot {
    /// Build a snapshot observed now.
    pub fn new(interfaces: impl IntoIterator<Item = Interface>) -> Self {
        Self {
            interfaces: interfaces
                .into_iter()
                .map(|iface| (iface.name.clone(), iface))
                .collect(),
            observed_at: Some(Instant::now()),
        }
    }

    /// An empty snapshot that has never been observed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up an interface by name.
    pub fn get(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    /// Iterate interfaces in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    /// Interface names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// When this snapshot was taken; `None` before the first observation.
    pub fn observed_at(&self) -> Option<Instant> {
        self.observed_at
    }

    /// Compare interface records, ignoring observation time.
    pub fn same_state(&self, other: &Snapshot) -> bool {
        self.interfaces == other.interfaces
    }
}

impl FromIterator<Interface> for Snapshot {
    fn from_iter<T: IntoIterator<Item = Interface>>(iter: T) -> Self {
        Self::new(iter)
    }
}
