//! Facade crate for Capable.
//! Re-exports the shared and feature crates and wires them into a ready-to-use [`Capable`].
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! ```rust
//! use capable::Capable;
//! use capable::center::NotificationReceiverExt;
//! use capable::domain::config::CapableConfig;
//! use capable::domain::features::Feature;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), capable::CapableError> {
//! let capable = Capable::from_config(&CapableConfig::default());
//! let mut posted = capable.subscribe()?;
//! let _observer = capable.start()?;
//!
//! capable.set_status(Feature::VoiceOver, "enabled")?;
//! let notification = posted.next_notification().await.expect("center is open");
//! assert_eq!(notification.to_string(), "voice_over=enabled");
//! # Ok(())
//! # }
//! ```

mod error;

pub use capable_center as center;
pub use capable_domain as domain;
pub use capable_kernel as kernel;
pub use capable_notifications as notifications;
pub use capable_statuses as statuses;
pub use error::{CapableError, CapableErrorExt};

use capable_center::NotificationCenter;
use capable_domain::config::CapableConfig;
use capable_domain::events::{FeatureStatusChanged, SettingChanged};
use capable_domain::features::Feature;
use capable_notifications::{Notifications, Notifier, SettingsObserver, spawn_observer};
use capable_statuses::StatusTable;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// The notifier wired by [`Capable`].
pub type DefaultNotifier = Notifications<StatusTable, NotificationCenter>;

/// A status table, a notification center and a notifier sharing both.
///
/// Cloning yields another handle to the same components.
#[derive(Debug, Clone)]
pub struct Capable {
    statuses: StatusTable,
    center: NotificationCenter,
    notifier: Arc<DefaultNotifier>,
}

impl Capable {
    pub fn from_config(config: &CapableConfig) -> Self {
        let statuses = StatusTable::from_config(&config.statuses);
        let center = NotificationCenter::new();
        let notifier = Arc::new(Notifications::with_config(
            statuses.clone(),
            center.clone(),
            config.notifications.clone(),
        ));

        info!(
            enabled = config.notifications.enabled,
            features = config.notifications.features.bits(),
            tracked = config.statuses.tracked.bits(),
            "Capable initialized"
        );
        Self { statuses, center, notifier }
    }

    /// Spawns the settings observer. Must be called from within a Tokio runtime.
    ///
    /// Callers that need every status (rather than the latest) wait on the
    /// returned handle after each [`set_status`](Self::set_status).
    ///
    /// # Errors
    /// Returns an error if the observer cannot subscribe to setting changes.
    pub fn start(&self) -> Result<SettingsObserver, CapableError> {
        spawn_observer(&self.center, self.notifier.clone()).context("Starting settings observer")
    }

    /// Records `status` for `feature` and raises [`SettingChanged`], the way the
    /// host platform would after a settings change.
    ///
    /// Returns the number of setting observers that were signalled.
    ///
    /// # Errors
    /// Returns an error if `feature` is not tracked.
    pub fn set_status(
        &self,
        feature: Feature,
        status: impl Into<String>,
    ) -> Result<usize, CapableError> {
        self.statuses.set(feature, status)?;
        self.signal(feature)
    }

    /// Boolean flavour of [`set_status`](Self::set_status).
    ///
    /// # Errors
    /// Returns an error if `feature` is not tracked or not an on/off setting.
    pub fn set_enabled(&self, feature: Feature, enabled: bool) -> Result<usize, CapableError> {
        self.statuses.set_enabled(feature, enabled)?;
        self.signal(feature)
    }

    /// Posts `status` directly, bypassing the status table.
    pub fn post_notification(&self, feature: Feature, status: &str) {
        self.notifier.post_notification(feature, status);
    }

    /// Starts observing posted feature statuses.
    ///
    /// # Errors
    /// Returns an error if the center refuses the subscription.
    pub fn subscribe(
        &self,
    ) -> Result<broadcast::Receiver<Arc<FeatureStatusChanged>>, CapableError> {
        Ok(self.center.subscribe::<FeatureStatusChanged>()?)
    }

    /// Stops raising setting changes; the observer finishes once it drained the pending ones.
    pub fn close_settings(&self) -> bool {
        self.center.close::<SettingChanged>()
    }

    /// Closes every channel of the center; observers finish once drained.
    pub fn shutdown(&self) -> usize {
        let closed = self.center.shutdown();
        info!(closed, "Capable shut down");
        closed
    }

    pub const fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    pub const fn center(&self) -> &NotificationCenter {
        &self.center
    }

    pub fn notifier(&self) -> &DefaultNotifier {
        &self.notifier
    }

    fn signal(&self, feature: Feature) -> Result<usize, CapableError> {
        let observers = self.center.post(SettingChanged::from(feature))?;
        debug!(%feature, observers, "Setting change raised");
        Ok(observers)
    }
}
