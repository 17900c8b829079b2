//! Submission-time validation.
//!
//! Rules run in a fixed order and the first one that fails is the only one
//! reported:
//!
//! 1. manual mode needs both an address and a subnet
//! 2. gateway and routes come together or not at all
//! 3. routes must be a well-formed `A.B.C.D/N` list
//! 4. a new interface name must be a valid kernel name
//! 5. the metric must be a non-negative decimal integer

use super::normalize::normalize;
use super::pending::PendingEdit;
use super::request::CanonicalRequest;
use crate::util::{addr, ifname};

/// Why a pending edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    /// Manual mode without an address or subnet.
    #[error("IP address and subnet are mandatory in manual mode")]
    MissingMandatoryField,

    /// Gateway without routes, or routes without a gateway.
    #[error("gateway and routes must be provided together")]
    GatewayRouteMismatch,

    /// Route list is not a comma-separated list of `ip/prefix` entries.
    #[error(
        "invalid routes format '{routes}': each route must follow the 'ip/prefix' format, e.g. 192.168.1.0/24"
    )]
    InvalidRouteFormat {
        /// The route list as entered.
        routes: String,
    },

    /// The new interface name is not usable.
    #[error("invalid interface name '{name}': {reason}")]
    InvalidInterfaceName {
        /// The name as entered.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Metric is not a non-negative integer.
    #[error("invalid metric '{value}': must be a non-negative integer")]
    InvalidMetric {
        /// The metric as entered.
        value: String,
    },
}

/// Check a pending edit, stopping at the first violated rule.
pub fn check(edit: &PendingEdit) -> Result<(), ValidationFailure> {
    if edit.is_manual() && (edit.address.is_empty() || edit.subnet.is_empty()) {
        return Err(ValidationFailure::MissingMandatoryField);
    }

    if edit.has_gateway() != edit.has_routes() {
        return Err(ValidationFailure::GatewayRouteMismatch);
    }

    if edit.has_routes() && addr::parse_route_list(&edit.routes).is_err() {
        return Err(ValidationFailure::InvalidRouteFormat {
            routes: edit.routes.clone(),
        });
    }

    let new_name = edit.new_name.trim();
    if !new_name.is_empty()
        && let Err(ifname::IfError::InvalidName(reason)) = ifname::validate(new_name)
    {
        return Err(ValidationFailure::InvalidInterfaceName {
            name: new_name.to_string(),
            reason,
        });
    }

    let metric = edit.metric.trim();
    if !metric.is_empty() && metric.parse::<u32>().is_err() {
        return Err(ValidationFailure::InvalidMetric {
            value: edit.metric.clone(),
        });
    }

    Ok(())
}

/// Validate a pending edit and produce its canonical request.
///
/// # Example
///
/// ```
/// use netedit::edit::{PendingEdit, ValidationFailure, validate};
/// use netedit::interface::AddressingMode;
///
/// let mut edit = PendingEdit::new("eth0");
/// edit.mode = AddressingMode::Manual;
/// edit.subnet = "255.255.255.0".into();
/// assert_eq!(validate(&edit), Err(ValidationFailure::MissingMandatoryField));
///
/// edit.address = "10.0.0.5".into();
/// let request = validate(&edit).unwrap();
/// assert_eq!(request.address, "10.0.0.5");
/// ```
pub fn validate(edit: &PendingEdit) -> Result<CanonicalRequest, ValidationFailure> {
    check(edit)?;
    Ok(normalize(edit))
}

impl PendingEdit {
    /// Shorthand for [`validate`].
    pub fn validate(&self) -> Result<CanonicalRequest, ValidationFailure> {
        validate(self)
    }
}
