use crate::delivery::NotificationDelivery;
use capable_domain::features::Feature;
use capable_domain::status::StatusSource;

/// Turns a feature status into a user-visible notification.
///
/// Both collaborators are part of the constructor, so an implementation
/// cannot be built without a status source and a delivery channel.
pub trait Notifier: Send + Sync {
    type Statuses: StatusSource;
    type Delivery: NotificationDelivery;

    fn new(statuses: Self::Statuses, delivery: Self::Delivery) -> Self
    where
        Self: Sized;

    /// Posts `status` for `feature`.
    ///
    /// Returns nothing: delivery is best effort and failures stay inside the notifier.
    fn post_notification(&self, feature: Feature, status: &str);
}
