//! Validation, apply outcomes and re-observation.

use netedit::Error;
use netedit::edit::ValidationFailure;
use netedit::interface::AddressingMode;
use netedit::sync::{Notice, SessionState};

use crate::common::{drain, host, observed};

#[tokio::test]
async fn test_missing_address_never_reaches_applier() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;

    sync.select("eth0").unwrap().address.clear();
    let err = sync.submit().await.unwrap_err();

    assert_eq!(
        err.validation(),
        Some(&ValidationFailure::MissingMandatoryField)
    );
    assert_eq!(sync.state(), SessionState::Editing);
    assert!(backend.applied().await.is_empty());
    assert_eq!(
        drain(&mut notices),
        [Notice::ValidationFailed(
            ValidationFailure::MissingMandatoryField
        )]
    );
}

#[tokio::test]
async fn test_gateway_without_routes() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().routes.clear();
    let err = sync.submit().await.unwrap_err();

    assert_eq!(
        err.validation(),
        Some(&ValidationFailure::GatewayRouteMismatch)
    );
    assert!(backend.applied().await.is_empty());
}

#[tokio::test]
async fn test_submit_without_selection() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    let err = sync.submit().await.unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidState {
            operation: "submit",
            state: "idle"
        }
    ));
}

#[tokio::test]
async fn test_success_reobserves_once() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;
    let before = backend.observations().await;

    let edit = sync.select("eth0").unwrap();
    edit.address = "10.0.0.9".into();
    edit.dns = " 9.9.9.9 , 1.1.1.1".into();
    let request = sync.submit().await.unwrap();

    assert_eq!(request.address, "10.0.0.9");
    assert_eq!(request.dns, ["9.9.9.9", "1.1.1.1"]);
    assert_eq!(sync.state(), SessionState::Idle);
    assert!(sync.pending().is_none());
    assert_eq!(backend.observations().await, before + 1);
    assert_eq!(backend.applied().await, [request]);

    let eth0 = sync.snapshot().get("eth0").cloned().unwrap();
    assert_eq!(eth0.address.as_deref(), Some("10.0.0.9"));
    assert_eq!(eth0.dns, ["9.9.9.9", "1.1.1.1"]);

    assert_eq!(
        drain(&mut notices),
        [Notice::Applied {
            name: "eth0".into()
        }]
    );
}

#[tokio::test]
async fn test_switch_to_dhcp_clears_static_fields() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().mode = AddressingMode::Dhcp;
    let request = sync.submit().await.unwrap();

    assert!(request.dhcp);
    assert_eq!(request.address, "");
    assert_eq!(request.subnet, "");
    assert_eq!(
        sync.snapshot().get("eth0").unwrap().mode,
        AddressingMode::Dhcp
    );
}

#[tokio::test]
async fn test_rename() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().new_name = "lan0".into();
    let request = sync.submit().await.unwrap();

    assert!(request.is_rename());
    let snapshot = sync.snapshot();
    assert!(snapshot.get("eth0").is_none());
    assert!(snapshot.get("lan0").is_some());
}

#[tokio::test]
async fn test_invalid_rename() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().new_name = "a-very-long-interface-name".into();
    let err = sync.submit().await.unwrap_err();
    assert!(matches!(
        err.validation(),
        Some(ValidationFailure::InvalidInterfaceName { .. })
    ));
}

#[tokio::test]
async fn test_apply_failure_keeps_edit() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;
    let before = backend.observations().await;

    sync.select("eth0").unwrap().metric = "50".into();
    backend.reject_next_apply("netplan apply failed").await;

    let err = sync.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "apply failed: netplan apply failed");
    assert_eq!(sync.state(), SessionState::Editing);
    assert_eq!(sync.pending().unwrap().metric, "50");
    assert_eq!(backend.observations().await, before);
    assert_eq!(
        drain(&mut notices),
        [Notice::ApplyFailed {
            name: "eth0".into(),
            reason: "netplan apply failed".into(),
        }]
    );

    // Resubmitting the kept edit succeeds
    sync.submit().await.unwrap();
    assert_eq!(sync.snapshot().get("eth0").unwrap().metric, Some(50));
}

#[tokio::test]
async fn test_failed_reobservation_still_succeeds() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;

    sync.select("eth0").unwrap().address = "10.0.0.9".into();
    backend.set_observe_failure(Some("connection reset")).await;

    sync.submit().await.unwrap();
    assert_eq!(sync.state(), SessionState::Idle);
    // Previous snapshot is kept
    assert_eq!(
        sync.snapshot().get("eth0").unwrap().address.as_deref(),
        Some("10.0.0.5")
    );
    assert_eq!(
        drain(&mut notices),
        [
            Notice::Applied {
                name: "eth0".into()
            },
            Notice::ObservationFailed {
                reason: "connection reset".into()
            },
        ]
    );
}

#[tokio::test]
async fn test_advisories_do_not_block() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;

    let edit = sync.select("eth0").unwrap();
    edit.gateway = "10.9.9.1".into();
    edit.routes = "300.0.0.0/8".into();
    sync.submit().await.unwrap();

    let advisories: Vec<_> = drain(&mut notices)
        .into_iter()
        .filter_map(|n| match n {
            Notice::Advisory(a) => Some(a.field),
            _ => None,
        })
        .collect();
    assert_eq!(advisories, ["gateway", "routes"]);
    assert_eq!(backend.applied().await.len(), 1);
}
