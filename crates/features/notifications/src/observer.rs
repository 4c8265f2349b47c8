use crate::delivery::NotificationDelivery;
use crate::error::{NotificationsError, NotificationsErrorExt};
use crate::notifications::Notifications;
use capable_center::NotificationCenter;
use capable_domain::events::SettingChanged;
use capable_domain::status::StatusSource;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Handle to a running settings observer.
///
/// Every received [`SettingChanged`] counts as handled once its status was
/// posted; signals dropped because the observer lagged count as handled too,
/// so [`wait_handled`](Self::wait_handled) never waits for a signal that is gone.
#[derive(Debug)]
pub struct SettingsObserver {
    task: JoinHandle<()>,
    handled: watch::Receiver<u64>,
}

impl SettingsObserver {
    /// Signals handled so far.
    pub fn handled(&self) -> u64 {
        *self.handled.borrow()
    }

    /// Waits until at least `count` signals were handled.
    ///
    /// Returns `false` if the observer stopped before reaching `count`.
    pub async fn wait_handled(&mut self, count: u64) -> bool {
        self.handled.wait_for(|handled| *handled >= count).await.is_ok()
    }

    /// Stops the observer without waiting for pending signals.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Waits for the observer to finish, which happens once the center closes
    /// the [`SettingChanged`] channel.
    ///
    /// # Errors
    /// Returns the [`JoinError`] if the task panicked or was aborted.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

/// Posts the current status of a feature every time its setting changes.
///
/// The subscription to [`SettingChanged`] is in place when this returns, so no
/// signal posted afterwards is missed.
///
/// # Errors
/// Returns [`NotificationsError::Delivery`] if the subscription is refused
/// (e.g. a zero `observer_capacity`).
///
/// # Panics
/// Panics when called outside of a Tokio runtime.
pub fn spawn_observer<S, D>(
    center: &NotificationCenter,
    notifications: Arc<Notifications<S, D>>,
) -> Result<SettingsObserver, NotificationsError>
where
    S: StatusSource + 'static,
    D: NotificationDelivery + 'static,
{
    let capacity = notifications.config().observer_capacity;
    let mut changes = center
        .subscribe_with_capacity::<SettingChanged>(capacity)
        .context("Subscribing to setting changes")?;
    let (progress, handled) = watch::channel(0u64);

    info!(capacity, "Settings observer started");

    let task = tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(changed) => {
                    notifications.post_current_status(changed.feature);
                    progress.send_modify(|handled| *handled += 1);
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Settings observer lagged; setting changes were skipped");
                    progress.send_modify(|handled| *handled += skipped);
                },
                Err(RecvError::Closed) => break,
            }
        }
        debug!(handled = *progress.borrow(), "Settings observer stopped: channel closed");
    });

    Ok(SettingsObserver { task, handled })
}
