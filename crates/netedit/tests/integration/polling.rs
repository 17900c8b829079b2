//! Background polling lifecycle.
//!
//! Time is paused so interval ticks advance instantly.

use std::time::Duration;

use netedit::interface::Interface;
use netedit::sync::{Notice, SyncOptions};
use tokio::time::{Instant, sleep};

use crate::common::{host, synchronizer};

#[tokio::test(start_paused = true)]
async fn test_first_poll_is_immediate() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();
    let started = Instant::now();

    sync.start();
    assert!(sync.is_polling());
    updates.changed().await.unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(updates.borrow_and_update().len(), 3);
    assert_eq!(backend.observations().await, 1);
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_polls_on_interval() {
    let backend = host();
    let (sync, _notices) = synchronizer(&backend);
    let mut sync = sync.with_options(SyncOptions::default().poll_interval(Duration::from_secs(2)));
    let mut updates = sync.subscribe();
    let started = Instant::now();

    sync.start();
    for _ in 0..3 {
        updates.changed().await.unwrap();
    }

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4), "{:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
    assert_eq!(backend.observations().await, 3);
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_poll_picks_up_host_changes() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();

    sync.start();
    updates.changed().await.unwrap();
    assert!(sync.snapshot().get("eth1").is_none());

    backend.set_interface(Interface::new("eth1").up()).await;
    updates.changed().await.unwrap();
    assert!(sync.snapshot().get("eth1").is_some());
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_poll_failure_keeps_snapshot() {
    let backend = host();
    let (mut sync, mut notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();

    sync.start();
    updates.changed().await.unwrap();
    backend.set_observe_failure(Some("timeout")).await;

    let notice = notices.recv().await.unwrap();
    assert_eq!(
        notice,
        Notice::ObservationFailed {
            reason: "timeout".into()
        }
    );
    assert_eq!(sync.snapshot().len(), 3);
    assert!(sync.is_polling());

    // Next successful poll recovers
    backend.set_observe_failure(None).await;
    updates.changed().await.unwrap();
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_poll_does_not_touch_pending_edit() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();

    sync.start();
    updates.changed().await.unwrap();
    sync.select("eth0").unwrap().address = "10.0.0.42".into();

    backend
        .set_interface(Interface::new("eth0").up().manual("10.0.0.6", "24"))
        .await;
    updates.changed().await.unwrap();

    assert_eq!(sync.pending().unwrap().address, "10.0.0.42");
    assert_eq!(sync.pending().unwrap().subnet, "255.255.255.0");
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_polling() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();

    sync.start();
    updates.changed().await.unwrap();
    sync.stop().await;
    assert!(!sync.is_polling());

    let observations = backend.observations().await;
    sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.observations().await, observations);

    // Polling can be restarted
    sync.start();
    updates.changed().await.unwrap();
    assert_eq!(backend.observations().await, observations + 1);
    sync.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_polling() {
    let backend = host();
    let (mut sync, _notices) = synchronizer(&backend);
    let mut updates = sync.subscribe();

    sync.start();
    updates.changed().await.unwrap();
    drop(sync);

    let observations = backend.observations().await;
    sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.observations().await, observations);
}
