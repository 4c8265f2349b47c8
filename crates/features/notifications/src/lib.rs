//! Notifications feature slice.
//!
//! * [`Notifier`]: the contract; built from a status source and a delivery channel.
//! * [`Notifications`]: the default notifier, posting [`FeatureStatusChanged`]
//!   through any [`NotificationDelivery`] (the [`NotificationCenter`] in production).
//! * [`spawn_observer`]: turns platform [`SettingChanged`] signals into posts of the
//!   current status.
//!
//! ```rust
//! use capable_center::NotificationCenter;
//! use capable_domain::features::Feature;
//! use capable_notifications::{Notifications, Notifier};
//! use capable_statuses::StatusTable;
//!
//! let center = NotificationCenter::new();
//! let mut rx = center.subscribe::<capable_domain::events::FeatureStatusChanged>().unwrap();
//!
//! let notifier = Notifications::new(StatusTable::default(), center.clone());
//! notifier.post_notification(Feature::VoiceOver, "enabled");
//!
//! let posted = rx.try_recv().unwrap();
//! assert_eq!(posted.feature, Feature::VoiceOver);
//! assert_eq!(posted.status, "enabled");
//! ```
//!
//! [`FeatureStatusChanged`]: capable_domain::events::FeatureStatusChanged
//! [`SettingChanged`]: capable_domain::events::SettingChanged
//! [`NotificationCenter`]: capable_center::NotificationCenter

mod contract;
mod delivery;
mod error;
mod notifications;
mod observer;

pub use contract::Notifier;
pub use delivery::NotificationDelivery;
pub use error::{NotificationsError, NotificationsErrorExt};
pub use notifications::Notifications;
pub use observer::{SettingsObserver, spawn_observer};
