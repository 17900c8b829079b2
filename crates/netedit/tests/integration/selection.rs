//! Selecting, seeding and cancelling edits.

use netedit::interface::{AddressingMode, Interface};
use netedit::policy::EditPolicy;
use netedit::sync::{Notice, SessionState};

use crate::common::{drain, host, observed, synchronizer};

#[tokio::test]
async fn test_select_seeds_observed_values() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    let edit = sync.select("eth0").unwrap();
    assert_eq!(edit.interface, "eth0");
    assert_eq!(edit.new_name, "eth0");
    assert_eq!(edit.mode, AddressingMode::Manual);
    assert_eq!(edit.address, "10.0.0.5");
    assert_eq!(edit.subnet, "255.255.255.0");
    assert_eq!(edit.gateway, "10.0.0.1");
    assert_eq!(edit.dns, "8.8.8.8,1.1.1.1");
    assert_eq!(edit.routes, "192.168.0.0/16");
    assert_eq!(edit.metric, "100");
    assert_eq!(sync.state(), SessionState::Editing);
}

#[tokio::test]
async fn test_select_dhcp_interface() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    let edit = sync.select("wlan0").unwrap();
    assert_eq!(edit.mode, AddressingMode::Dhcp);
    assert_eq!(edit.address, "192.168.1.33");
    assert_eq!(edit.gateway, "");
}

#[tokio::test]
async fn test_reserved_interface_is_refused() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;

    let err = sync.select("enp6s0f0").unwrap_err();
    assert_eq!(err.to_string(), "interface enp6s0f0 cannot be edited");
    assert_eq!(sync.state(), SessionState::Idle);
    assert!(sync.pending().is_none());
    assert_eq!(
        drain(&mut notices),
        [Notice::NotEditable {
            name: "enp6s0f0".into()
        }]
    );
}

#[tokio::test]
async fn test_custom_policy() {
    let backend = host();
    let (sync, _notices) = synchronizer(&backend);
    let mut sync = sync.with_policy(EditPolicy::new(["wlan\\d+"]).unwrap());
    sync.refresh().await.unwrap();

    assert!(sync.select("wlan0").is_err());
    assert!(sync.select("enp6s0f0").is_ok());
}

#[tokio::test]
async fn test_unknown_interface() {
    let backend = host();
    let (mut sync, mut notices) = observed(&backend).await;

    let err = sync.select("eth9").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(sync.state(), SessionState::Idle);
    assert_eq!(
        drain(&mut notices),
        [Notice::InterfaceNotFound {
            name: "eth9".into()
        }]
    );
}

#[tokio::test]
async fn test_select_before_first_observation() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);

    assert!(sync.select("eth0").unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_refresh_keeps_pending_edit() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().address = "10.0.0.99".into();

    backend
        .set_interface(Interface::new("eth0").up().manual("10.0.0.7", "255.255.0.0"))
        .await;
    sync.refresh().await.unwrap();

    assert_eq!(
        sync.snapshot().get("eth0").unwrap().address.as_deref(),
        Some("10.0.0.7")
    );
    let edit = sync.pending().unwrap();
    assert_eq!(edit.address, "10.0.0.99");
    assert_eq!(edit.subnet, "255.255.255.0");
}

#[tokio::test]
async fn test_cancel_discards_edit() {
    let backend = host();
    let (mut sync, _notices) = observed(&backend).await;

    sync.select("eth0").unwrap().gateway.clear();
    sync.cancel().unwrap();
    assert_eq!(sync.state(), SessionState::Idle);
    assert!(sync.pending().is_none());

    // Reselecting seeds afresh
    assert_eq!(sync.select("eth0").unwrap().gateway, "10.0.0.1");
}
