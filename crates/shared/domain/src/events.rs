//! Notification payloads exchanged through the notification center.

use crate::constants::ENABLED;
use crate::features::Feature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Posted whenever the status of a feature is announced to observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureStatusChanged {
    pub feature: Feature,
    pub status: String,
}

impl FeatureStatusChanged {
    pub fn new(feature: Feature, status: impl Into<String>) -> Self {
        Self { feature, status: status.into() }
    }

    /// `true` when the status is the canonical [`ENABLED`] string.
    pub fn is_enabled(&self) -> bool {
        self.status == ENABLED
    }
}

impl fmt::Display for FeatureStatusChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.feature, self.status)
    }
}

/// Raised by the host platform when a feature setting changed.
///
/// Carries no status: observers re-read the current value from a status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingChanged {
    pub feature: Feature,
}

impl From<Feature> for SettingChanged {
    fn from(feature: Feature) -> Self {
        Self { feature }
    }
}
