//! Non-blocking advisories about a pending edit.
//!
//! Validation only enforces shape. Things the backend may still choke on,
//! such as an octet above 255 or a gateway outside the subnet, are reported
//! here as warnings and never stop a submission.

use std::fmt;

use super::normalize::split_list;
use super::pending::PendingEdit;
use crate::util::addr;

/// A single warning about one field of a pending edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    /// Field the warning is about.
    pub field: &'static str,
    /// Description of the issue.
    pub message: String,
}

impl Advisory {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning in '{}': {}", self.field, self.message)
    }
}

/// Collect advisories for a pending edit.
///
/// Fields that validation would reject outright are skipped; this only
/// looks at values that would be accepted.
pub fn advise(edit: &PendingEdit) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let mut network = None;
    if edit.is_manual() {
        let address = (!edit.address.is_empty())
            .then(|| addr::parse_ipv4(&edit.address))
            .transpose();
        let prefix = (!edit.subnet.is_empty())
            .then(|| addr::parse_subnet(&edit.subnet))
            .transpose();

        if let Err(e) = &address {
            advisories.push(Advisory::new("address", e.to_string()));
        }
        if let Err(e) = &prefix {
            advisories.push(Advisory::new("subnet", e.to_string()));
        }
        if let (Ok(Some(address)), Ok(Some(prefix))) = (address, prefix) {
            network = Some((address, prefix));
        }
    } else if !edit.address.is_empty() || !edit.subnet.is_empty() {
        advisories.push(Advisory::new(
            "address",
            "static address and subnet are ignored in DHCP mode",
        ));
    }

    if edit.has_gateway() {
        match addr::parse_ipv4(&edit.gateway) {
            Ok(gateway) => {
                if let Some((address, prefix)) = network
                    && !addr::ipv4_in_prefix(gateway, address, prefix)
                {
                    advisories.push(Advisory::new(
                        "gateway",
                        format!("{} is outside {}/{}", gateway, address, prefix),
                    ));
                }
            }
            Err(e) => advisories.push(Advisory::new("gateway", e.to_string())),
        }
    }

    for server in split_list(&edit.dns) {
        if let Err(e) = addr::parse_ipv4(&server) {
            advisories.push(Advisory::new("dns", e.to_string()));
        }
    }

    if edit.has_routes()
        && let Ok(routes) = addr::parse_route_list(&edit.routes)
    {
        for route in routes.iter().filter(|r| !r.is_in_range()) {
            advisories.push(Advisory::new(
                "routes",
                format!("{} has an octet above 255 or a prefix above 32", route),
            ));
        }
    }

    advisories
}
