//! Clock-owning runtime around the notification stack.
//!
//! The [`StackRuntime`] spawns a driver task that holds the
//! [`NotificationStack`] and totally orders everything that can mutate
//! it: host commands arrive on an mpsc channel, and deadline firings
//! arrive from a single `sleep_until` recomputed every loop turn. There
//! is never more than one pending timer, so cancelling a countdown is
//! just not scheduling it again.
//!
//! Outbound, the driver fans lifecycle events out on a broadcast channel
//! and republishes a render snapshot on a watch channel after every
//! mutation. Shutting down (or dropping) the runtime stops the driver,
//! so no event is ever delivered after teardown.

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};

use crate::config::{SettingsError, StackSettings};
use crate::domain::{NotificationId, NotificationRecord};
use crate::lifecycle::{NotificationStack, ReconcileError, StackEvent};
use crate::ui::StackView;

/// Sleep horizon while no deadline is pending. The select arm is
/// disabled in that state; the value only exists to have something to
/// construct.
const IDLE_PARK: Duration = Duration::from_secs(3600);

/// Errors from runtime command submission.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The desired list failed validation and was not enqueued.
    #[error("Invalid notification batch: {0}")]
    InvalidBatch(#[from] ReconcileError),

    /// The driver task has stopped; no further commands are accepted.
    #[error("Notification runtime is closed")]
    Closed,
}

/// Commands applied by the driver task, in submission order.
#[derive(Debug)]
enum StackCommand {
    Reconcile(Vec<NotificationRecord>),
    Dismiss(NotificationId),
    DismissAll,
    Pause(NotificationId),
    Resume(NotificationId),
    InvokeAction {
        id: NotificationId,
        action_id: String,
    },
    Shutdown,
}

/// Handle to a running notification stack.
///
/// Cheap to use from any task; all mutation happens on the driver task.
/// Dropping the handle aborts the driver, cancelling every pending
/// settle, countdown, and removal timer.
///
/// # Example
///
/// ```ignore
/// let mut runtime = StackRuntime::spawn(StackSettings::default())?;
/// let mut events = runtime.subscribe();
///
/// runtime.reconcile(vec![NotificationRecord::success("saved", "Draft saved")])?;
/// while let Ok(event) = events.recv().await {
///     // drive the host's source list from Dismissed events
/// }
/// ```
pub struct StackRuntime {
    commands: mpsc::UnboundedSender<StackCommand>,
    events: broadcast::Sender<StackEvent>,
    view: watch::Receiver<StackView>,
    driver: Option<JoinHandle<()>>,
}

impl StackRuntime {
    /// Validates the settings and spawns the driver task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(settings: StackSettings) -> std::result::Result<Self, SettingsError> {
        let stack = NotificationStack::new(settings)?;
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(100);
        let (view_tx, view) = watch::channel(stack.view(Instant::now()));

        let driver = tokio::spawn(drive(stack, command_rx, events.clone(), view_tx));

        Ok(Self {
            commands,
            events,
            view,
            driver: Some(driver),
        })
    }

    /// Submits the caller's full desired record list.
    ///
    /// Duplicate ids are rejected here, synchronously, before anything
    /// is enqueued.
    pub fn reconcile(
        &self,
        records: Vec<NotificationRecord>,
    ) -> std::result::Result<(), RuntimeError> {
        NotificationStack::validate_batch(&records)?;
        self.send(StackCommand::Reconcile(records))
    }

    /// Requests manual dismissal of one notification.
    pub fn dismiss(&self, id: NotificationId) -> std::result::Result<(), RuntimeError> {
        self.send(StackCommand::Dismiss(id))
    }

    /// Requests that every notification start exiting.
    pub fn dismiss_all(&self) -> std::result::Result<(), RuntimeError> {
        self.send(StackCommand::DismissAll)
    }

    /// Pauses a notification's countdown (pointer entered).
    pub fn pause(&self, id: NotificationId) -> std::result::Result<(), RuntimeError> {
        self.send(StackCommand::Pause(id))
    }

    /// Resumes a notification's countdown (pointer left).
    pub fn resume(&self, id: NotificationId) -> std::result::Result<(), RuntimeError> {
        self.send(StackCommand::Resume(id))
    }

    /// Reports an action button press for event routing.
    pub fn invoke_action(
        &self,
        id: NotificationId,
        action_id: impl Into<String>,
    ) -> std::result::Result<(), RuntimeError> {
        self.send(StackCommand::InvokeAction {
            id,
            action_id: action_id.into(),
        })
    }

    /// Subscribes to lifecycle events.
    ///
    /// Only events emitted after the subscription are delivered; slow
    /// consumers may observe `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<StackEvent> {
        self.events.subscribe()
    }

    /// Returns a watch handle over render snapshots.
    pub fn view(&self) -> watch::Receiver<StackView> {
        self.view.clone()
    }

    /// Stops the driver and waits for it to finish.
    ///
    /// Pending settle, countdown, and removal timers are dropped; no
    /// event is emitted after this returns.
    pub async fn shutdown(&mut self) {
        let _ = self.commands.send(StackCommand::Shutdown);
        if let Some(driver) = self.driver.take() {
            let _ = driver.await;
        }
    }

    fn send(&self, command: StackCommand) -> std::result::Result<(), RuntimeError> {
        self.commands.send(command).map_err(|_| RuntimeError::Closed)
    }
}

impl Drop for StackRuntime {
    fn drop(&mut self) {
        if let Some(driver) = &self.driver {
            driver.abort();
        }
    }
}

/// Driver loop: one select over the command channel and the earliest
/// stack deadline.
async fn drive(
    mut stack: NotificationStack,
    mut commands: mpsc::UnboundedReceiver<StackCommand>,
    events: broadcast::Sender<StackEvent>,
    view: watch::Sender<StackView>,
) {
    loop {
        let wake = stack.next_wake();
        let deadline = wake.unwrap_or_else(|| Instant::now() + IDLE_PARK);

        let fired = tokio::select! {
            command = commands.recv() => match command {
                Some(StackCommand::Shutdown) | None => break,
                Some(command) => apply(&mut stack, command),
            },
            _ = time::sleep_until(deadline), if wake.is_some() => {
                stack.advance(Instant::now())
            }
        };

        for event in fired {
            let _ = events.send(event);
        }
        let _ = view.send(stack.view(Instant::now()));
    }

    tracing::debug!("Notification driver stopped");
}

fn apply(stack: &mut NotificationStack, command: StackCommand) -> Vec<StackEvent> {
    let now = Instant::now();
    match command {
        StackCommand::Reconcile(records) => match stack.reconcile(&records, now) {
            Ok(events) => events,
            Err(error) => {
                tracing::warn!(%error, "Reconcile rejected");
                Vec::new()
            }
        },
        StackCommand::Dismiss(id) => stack.dismiss(&id, now).into_iter().collect(),
        StackCommand::DismissAll => stack.dismiss_all(now),
        StackCommand::Pause(id) => {
            stack.pause(&id, now);
            Vec::new()
        }
        StackCommand::Resume(id) => {
            stack.resume(&id, now);
            Vec::new()
        }
        StackCommand::InvokeAction { id, action_id } => stack
            .invoke_action(&id, &action_id)
            .into_iter()
            .collect(),
        // Intercepted by the driver loop before apply.
        StackCommand::Shutdown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(id: &str, millis: u64) -> NotificationRecord {
        NotificationRecord::info(id, "Test").with_duration(Some(Duration::from_millis(millis)))
    }

    fn nid(id: &str) -> NotificationId {
        NotificationId::from(id)
    }

    #[tokio::test(start_paused = true)]
    async fn full_lifecycle_over_runtime() {
        let runtime = StackRuntime::spawn(StackSettings::default()).unwrap();
        let mut events = runtime.subscribe();
        let t0 = Instant::now();

        runtime.reconcile(vec![timed("a", 5000)]).unwrap();

        assert_eq!(events.recv().await.unwrap(), StackEvent::Entered(nid("a")));
        assert_eq!(events.recv().await.unwrap(), StackEvent::Settled(nid("a")));
        assert_eq!(t0.elapsed(), Duration::from_millis(50));

        assert_eq!(
            events.recv().await.unwrap(),
            StackEvent::ExitStarted {
                id: nid("a"),
                reason: crate::lifecycle::DismissReason::Expired,
            }
        );
        assert_eq!(t0.elapsed(), Duration::from_millis(5000));

        assert_eq!(
            events.recv().await.unwrap(),
            StackEvent::Dismissed {
                id: nid("a"),
                reason: crate::lifecycle::DismissReason::Expired,
            }
        );
        assert_eq!(t0.elapsed(), Duration::from_millis(5300));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_batch_rejected_synchronously() {
        let runtime = StackRuntime::spawn(StackSettings::default()).unwrap();

        let result = runtime.reconcile(vec![timed("a", 1000), timed("a", 2000)]);
        assert!(matches!(result, Err(RuntimeError::InvalidBatch(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn view_snapshot_follows_events() {
        let runtime = StackRuntime::spawn(StackSettings::default()).unwrap();
        let mut events = runtime.subscribe();

        runtime.reconcile(vec![timed("a", 5000)]).unwrap();
        events.recv().await.unwrap();
        events.recv().await.unwrap();

        let view = runtime.view();
        let snapshot = view.borrow();
        assert_eq!(snapshot.toasts.len(), 1);
        assert_eq!(
            snapshot.toasts[0].phase,
            crate::lifecycle::AnimationPhase::Visible
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_drops_pending_timers() {
        let mut runtime = StackRuntime::spawn(StackSettings::default()).unwrap();
        let mut events = runtime.subscribe();

        runtime.reconcile(vec![timed("a", 100)]).unwrap();
        runtime.shutdown().await;

        // The admission was processed, nothing after it fires.
        assert_eq!(events.try_recv().unwrap(), StackEvent::Entered(nid("a")));
        time::sleep(Duration::from_secs(60)).await;
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        assert!(matches!(
            runtime.dismiss_all(),
            Err(RuntimeError::Closed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn hover_pause_defers_expiry() {
        let runtime = StackRuntime::spawn(StackSettings::default()).unwrap();
        let mut events = runtime.subscribe();
        let t0 = Instant::now();

        runtime.reconcile(vec![timed("a", 5000)]).unwrap();
        events.recv().await.unwrap();
        events.recv().await.unwrap();

        time::sleep_until(t0 + Duration::from_millis(2000)).await;
        runtime.pause(nid("a")).unwrap();

        time::sleep_until(t0 + Duration::from_millis(10_000)).await;
        runtime.resume(nid("a")).unwrap();

        // 2000ms consumed before the pause, 3000ms left after the resume.
        let event = events.recv().await.unwrap();
        assert!(matches!(event, StackEvent::ExitStarted { .. }));
        assert_eq!(t0.elapsed(), Duration::from_millis(13_000));
    }
}
