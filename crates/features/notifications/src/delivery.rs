use crate::error::NotificationsError;
use capable_center::NotificationCenter;
use capable_domain::events::FeatureStatusChanged;
use std::sync::Arc;

/// Emits feature status notifications to whoever is listening.
pub trait NotificationDelivery: Send + Sync {
    /// Hands `notification` to the delivery channel and returns how many observers got it.
    ///
    /// # Errors
    /// Implementation specific; the notifier only logs them.
    fn deliver(&self, notification: FeatureStatusChanged) -> Result<usize, NotificationsError>;
}

impl NotificationDelivery for NotificationCenter {
    fn deliver(&self, notification: FeatureStatusChanged) -> Result<usize, NotificationsError> {
        Ok(self.post(notification)?)
    }
}

impl<T: NotificationDelivery + ?Sized> NotificationDelivery for Arc<T> {
    fn deliver(&self, notification: FeatureStatusChanged) -> Result<usize, NotificationsError> {
        (**self).deliver(notification)
    }
}
