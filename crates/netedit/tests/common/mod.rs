//! Common test utilities for integration tests.

use netedit::backend::MemoryBackend;
use netedit::interface::Interface;
use netedit::sync::{Notice, Synchronizer};
use tokio::sync::mpsc;

pub type TestSync = Synchronizer<MemoryBackend, MemoryBackend>;

/// A host with one manual interface, one DHCP interface and the reserved
/// uplink.
pub fn host() -> MemoryBackend {
    MemoryBackend::new([
        Interface::new("eth0")
            .up()
            .manual("10.0.0.5", "255.255.255.0")
            .gateway("10.0.0.1")
            .route("192.168.0.0/16")
            .dns(["8.8.8.8", "1.1.1.1"])
            .metric(100),
        Interface::new("wlan0")
            .up()
            .dhcp(Some(("192.168.1.33", "255.255.255.0"))),
        Interface::new("enp6s0f0").up().dhcp(None),
    ])
}

/// A synchronizer over `backend` whose notices land in the returned
/// channel. Nothing has been observed yet.
pub fn synchronizer(backend: &MemoryBackend) -> (TestSync, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sync = Synchronizer::new(backend.clone(), backend.clone()).with_notifier(tx);
    (sync, rx)
}

/// Like [`synchronizer`], with one observation already made.
pub async fn observed(backend: &MemoryBackend) -> (TestSync, mpsc::UnboundedReceiver<Notice>) {
    let (sync, rx) = synchronizer(backend);
    sync.refresh().await.expect("initial observation");
    (sync, rx)
}

/// Collect every notice delivered so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}
