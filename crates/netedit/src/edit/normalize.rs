//! Pending edit to canonical request.

use super::pending::PendingEdit;
use super::request::CanonicalRequest;

/// Convert a pending edit into a canonical request.
///
/// This does no checking of its own; call [`validate`](super::validate())
/// to get a request that is safe to hand to an applier.
///
/// - DHCP mode always clears `address` and `subnet`.
/// - An empty gateway becomes `None`.
/// - DNS servers and routes are split on commas and trimmed.
/// - An empty or unparsable metric becomes `None`.
pub fn normalize(edit: &PendingEdit) -> CanonicalRequest {
    let (address, subnet) = if edit.is_manual() {
        (edit.address.clone(), edit.subnet.clone())
    } else {
        (String::new(), String::new())
    };

    CanonicalRequest {
        interface: edit.interface.clone(),
        new_interface_name: edit.target_name().to_string(),
        address,
        subnet,
        gateway: (!edit.gateway.is_empty()).then(|| edit.gateway.clone()),
        dns: split_list(&edit.dns),
        dhcp: !edit.is_manual(),
        routes: split_list(&edit.routes),
        metric: parse_metric(&edit.metric),
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn parse_metric(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}
