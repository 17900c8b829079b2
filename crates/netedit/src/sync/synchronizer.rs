//! The state synchronizer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::notice::{LogNotifier, Notice, Notifier};
use super::session::{Session, SessionState};
use crate::backend::{Applier, ObservationSource};
use crate::edit::{CanonicalRequest, PendingEdit, advise};
use crate::error::{Error, Result};
use crate::interface::Snapshot;
use crate::policy::EditPolicy;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Synchronizer tuning.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Time between background observations.
    pub poll_interval: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SyncOptions {
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Keeps the observed snapshot fresh and drives the edit session.
///
/// Snapshots are published through a `watch` channel; the background poll
/// task and [`refresh`](Self::refresh) replace the whole snapshot and never
/// touch the pending edit.
pub struct Synchronizer<S, A> {
    source: Arc<S>,
    applier: A,
    policy: EditPolicy,
    notifier: Arc<dyn Notifier>,
    snapshot: Arc<watch::Sender<Arc<Snapshot>>>,
    session: Session,
    options: SyncOptions,
    poller: Option<PollHandle>,
}

impl<S: ObservationSource, A: Applier> Synchronizer<S, A> {
    /// Create a synchronizer with the default policy, a logging notifier
    /// and an empty snapshot.
    pub fn new(source: S, applier: A) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::empty()));
        Self {
            source: Arc::new(source),
            applier,
            policy: EditPolicy::default(),
            notifier: Arc::new(LogNotifier),
            snapshot: Arc::new(snapshot),
            session: Session::new(),
            options: SyncOptions::default(),
            poller: None,
        }
    }

    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn policy(&self) -> &EditPolicy {
        &self.policy
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot.subscribe()
    }

    /// Observe now and publish the result.
    ///
    /// A failure keeps the previous snapshot and is also reported as a
    /// notice.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        observe_once(&*self.source, &self.snapshot, &*self.notifier).await
    }

    /// Start background polling. The first observation happens right away.
    ///
    /// Does nothing if polling is already running.
    pub fn start(&mut self) {
        if self.is_polling() {
            return;
        }

        let source = Arc::clone(&self.source);
        let snapshot = Arc::clone(&self.snapshot);
        let notifier = Arc::clone(&self.notifier);
        let period = self.options.poll_interval.max(Duration::from_millis(1));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        // Failures are already logged and notified
                        let _ = observe_once(&*source, &snapshot, &*notifier).await;
                    }
                }
            }
            debug!("poller stopped");
        });

        debug!(interval = ?period, "poller started");
        self.poller = Some(PollHandle {
            stop_tx: Some(stop_tx),
            task,
        });
    }

    /// Stop background polling and wait for the task to finish.
    pub async fn stop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.task.is_finished())
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// The pending edit, while Editing or Applying.
    pub fn pending(&self) -> Option<&PendingEdit> {
        self.session.pending()
    }

    /// Mutable access to the pending edit, while Editing.
    pub fn edit_mut(&mut self) -> Option<&mut PendingEdit> {
        self.session.edit_mut()
    }

    /// Start editing `name`, seeded from the latest snapshot.
    pub fn select(&mut self, name: &str) -> Result<&mut PendingEdit> {
        let snapshot = self.snapshot();
        match self.session.select(name, &snapshot, &self.policy) {
            Ok(edit) => Ok(edit),
            Err(e) => {
                let notice = match &e {
                    Error::NotEditable { name } => Some(Notice::NotEditable { name: name.clone() }),
                    Error::InterfaceNotFound { name } => {
                        Some(Notice::InterfaceNotFound { name: name.clone() })
                    }
                    _ => None,
                };
                if let Some(notice) = notice {
                    self.notifier.notify(notice);
                }
                Err(e)
            }
        }
    }

    /// Discard the pending edit.
    pub fn cancel(&mut self) -> Result<()> {
        self.session.cancel()
    }

    /// Validate the pending edit and hand it to the applier.
    ///
    /// On success the session returns to Idle and exactly one fresh
    /// observation is made; a failure of that observation is reported but
    /// does not fail the submit. On a validation failure nothing is sent.
    /// On an apply failure the edit is kept for correction.
    ///
    /// If the returned future is dropped mid-apply, the session returns to
    /// Editing with the edit kept.
    pub async fn submit(&mut self) -> Result<CanonicalRequest> {
        let request = match self.session.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                if let Some(failure) = e.validation() {
                    self.notifier.notify(Notice::ValidationFailed(failure.clone()));
                }
                return Err(e);
            }
        };

        if let Some(edit) = self.session.pending() {
            for advisory in advise(edit) {
                warn!(interface = %request.interface, "{}", advisory);
                self.notifier.notify(Notice::Advisory(advisory));
            }
        }

        let guard = ApplyGuard(&mut self.session);
        let outcome = self.applier.apply(&request).await;
        guard.finish(outcome.is_ok());

        match outcome {
            Ok(()) => {
                info!(
                    interface = %request.interface,
                    name = %request.new_interface_name,
                    "applied network configuration"
                );
                self.notifier.notify(Notice::Applied {
                    name: request.new_interface_name.clone(),
                });
                if let Err(e) = self.refresh().await {
                    debug!("refresh after apply failed: {}", e);
                }
                Ok(request)
            }
            Err(e) => {
                let reason = match e {
                    Error::ApplyFailed { reason } => reason,
                    other => other.to_string(),
                };
                warn!(interface = %request.interface, "apply failed: {}", reason);
                self.notifier.notify(Notice::ApplyFailed {
                    name: request.interface.clone(),
                    reason: reason.clone(),
                });
                Err(Error::ApplyFailed { reason })
            }
        }
    }
}

async fn observe_once<S: ObservationSource>(
    source: &S,
    snapshot: &watch::Sender<Arc<Snapshot>>,
    notifier: &dyn Notifier,
) -> Result<Arc<Snapshot>> {
    match source.observe().await {
        Ok(observed) => {
            let observed = Arc::new(observed);
            debug!(interfaces = observed.len(), "observed");
            snapshot.send_replace(Arc::clone(&observed));
            Ok(observed)
        }
        Err(e) => {
            warn!("{}", e);
            let reason = match &e {
                Error::ObservationFailed { reason } => reason.clone(),
                other => other.to_string(),
            };
            notifier.notify(Notice::ObservationFailed { reason });
            Err(e)
        }
    }
}

/// Returns the session to Editing unless the apply outcome was recorded.
struct ApplyGuard<'a>(&'a mut Session);

impl ApplyGuard<'_> {
    fn finish(self, applied: bool) {
        self.0.finish_apply(applied);
    }
}

impl Drop for ApplyGuard<'_> {
    fn drop(&mut self) {
        // No-op once finish() has moved the session out of Applying
        self.0.finish_apply(false);
    }
}

/// Handle to the background poll task. Dropping it aborts the task.
struct PollHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await
            && e.is_panic()
        {
            warn!("poller panicked: {}", e);
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
