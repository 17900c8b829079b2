//! The operator's working copy of one interface.

use crate::interface::{AddressingMode, Interface};

/// Working copy of an interface's configuration during an edit session.
///
/// Fields hold exactly what the operator typed. Nothing here is checked
/// until the edit is submitted; see [`validate`](super::validate()).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingEdit {
    /// The interface that was selected.
    pub interface: String,
    /// New name for the interface; empty keeps the current one.
    pub new_name: String,
    pub mode: AddressingMode,
    pub address: String,
    /// Dotted mask or prefix length.
    pub subnet: String,
    pub gateway: String,
    /// Comma-separated DNS servers.
    pub dns: String,
    /// Comma-separated route destinations in `A.B.C.D/N` form.
    pub routes: String,
    /// Default route metric, decimal.
    pub metric: String,
}

impl PendingEdit {
    /// Start an edit with nothing filled in.
    pub fn new(interface: impl Into<String>) -> Self {
        let interface = interface.into();
        Self {
            new_name: interface.clone(),
            interface,
            ..Default::default()
        }
    }

    /// Seed an edit from an observed record.
    ///
    /// # Example
    ///
    /// ```
    /// use netedit::edit::PendingEdit;
    /// use netedit::interface::Interface;
    ///
    /// let observed = Interface::new("eth0")
    ///     .manual("10.0.0.5", "255.255.255.0")
    ///     .gateway("10.0.0.1")
    ///     .route("192.168.0.0/16")
    ///     .route("172.16.0.0/12");
    ///
    /// let edit = PendingEdit::seed(&observed);
    /// assert_eq!(edit.address, "10.0.0.5");
    /// assert_eq!(edit.routes, "192.168.0.0/16, 172.16.0.0/12");
    /// ```
    pub fn seed(observed: &Interface) -> Self {
        Self {
            interface: observed.name.clone(),
            new_name: observed.name.clone(),
            mode: observed.mode,
            address: observed.address.clone().unwrap_or_default(),
            subnet: observed.subnet.clone().unwrap_or_default(),
            gateway: observed.gateway.clone().unwrap_or_default(),
            dns: observed.dns.join(","),
            routes: observed.routes.join(", "),
            metric: observed.metric.map(|m| m.to_string()).unwrap_or_default(),
        }
    }

    /// The name the request will target after the edit.
    pub fn target_name(&self) -> &str {
        let renamed = self.new_name.trim();
        if renamed.is_empty() {
            &self.interface
        } else {
            renamed
        }
    }

    pub fn is_manual(&self) -> bool {
        self.mode == AddressingMode::Manual
    }

    pub fn has_gateway(&self) -> bool {
        !self.gateway.is_empty()
    }

    pub fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }
}
