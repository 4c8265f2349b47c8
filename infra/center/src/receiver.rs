use crate::center::Notification;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Ergonomic receiving for notification observers.
///
/// Lag is absorbed: if the observer fell behind and the channel dropped
/// notifications, receiving continues from the oldest one still buffered.
pub trait NotificationReceiverExt<T> {
    /// Waits for the next notification, returning `None` once the center closed the channel.
    fn next_notification(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Notification> NotificationReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn next_notification(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(notification) => {
                    if skipped > 0 {
                        warn!(
                            notification = std::any::type_name::<T>(),
                            skipped, "Observer lagged; notifications were skipped"
                        );
                    }
                    return Some(notification);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(notification = std::any::type_name::<T>(), skipped = n, "Observer lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
