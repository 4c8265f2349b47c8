use crate::contract::Notifier;
use crate::delivery::NotificationDelivery;
use capable_domain::config::NotificationsConfig;
use capable_domain::events::FeatureStatusChanged;
use capable_domain::features::Feature;
use capable_domain::status::StatusSource;
use tracing::{debug, trace, warn};

/// Default [`Notifier`]: filters by configuration, then posts synchronously on
/// the caller's thread.
///
/// The notifier keeps nothing between calls; every post builds a fresh
/// [`FeatureStatusChanged`] and hands it to the delivery collaborator.
#[derive(Debug, Clone)]
pub struct Notifications<S, D> {
    statuses: S,
    delivery: D,
    config: NotificationsConfig,
}

impl<S, D> Notifications<S, D>
where
    S: StatusSource,
    D: NotificationDelivery,
{
    /// Builds a notifier with an explicit posting policy.
    pub const fn with_config(statuses: S, delivery: D, config: NotificationsConfig) -> Self {
        Self { statuses, delivery, config }
    }

    /// Re-reads the status of `feature` and posts it.
    ///
    /// Returns `true` when a notification was handed to the delivery
    /// collaborator. `false` means the source had no status for `feature`, or
    /// the posting policy suppressed it.
    pub fn post_current_status(&self, feature: Feature) -> bool {
        let Some(status) = self.statuses.status(feature) else {
            debug!(%feature, "No status known; nothing to post");
            return false;
        };

        self.post(feature, &status)
    }

    pub const fn statuses(&self) -> &S {
        &self.statuses
    }

    pub const fn delivery(&self) -> &D {
        &self.delivery
    }

    pub const fn config(&self) -> &NotificationsConfig {
        &self.config
    }

    fn post(&self, feature: Feature, status: &str) -> bool {
        if !self.should_post(feature) {
            return false;
        }

        match self.delivery.deliver(FeatureStatusChanged::new(feature, status)) {
            Ok(observers) => debug!(%feature, status, observers, "Feature status posted"),
            Err(err) => warn!(%feature, status, error = %err, "Failed to post feature status"),
        }
        true
    }

    fn should_post(&self, feature: Feature) -> bool {
        if !self.config.enabled {
            trace!(%feature, "Notifications disabled");
            return false;
        }
        if !self.config.features.has(feature) {
            trace!(%feature, "Feature filtered out of notifications");
            return false;
        }
        true
    }
}

impl<S, D> Notifier for Notifications<S, D>
where
    S: StatusSource,
    D: NotificationDelivery,
{
    type Statuses = S;
    type Delivery = D;

    fn new(statuses: S, delivery: D) -> Self {
        Self::with_config(statuses, delivery, NotificationsConfig::default())
    }

    fn post_notification(&self, feature: Feature, status: &str) {
        self.post(feature, status);
    }
}
