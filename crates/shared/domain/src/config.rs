use crate::features::{Feature, FeatureSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the capable crates.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CapableConfigInner {
    pub notifications: NotificationsConfig,
    pub statuses: StatusesConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
///
/// Deserializes straight through [`CapableConfigInner`], so loaders that coerce
/// string values (environment overrides) see the target field types.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "CapableConfigInner")]
pub struct CapableConfig {
    inner: Arc<CapableConfigInner>,
}

impl From<CapableConfigInner> for CapableConfig {
    fn from(inner: CapableConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for CapableConfig {
    type Target = CapableConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for CapableConfig {
    fn deref_mut(&mut self) -> &mut CapableConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Notification posting policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Master switch; when off nothing is posted.
    pub enabled: bool,
    /// Features whose status changes are posted.
    pub features: FeatureSet,
    /// Buffer size of the settings observer subscription.
    pub observer_capacity: usize,
}

/// Status source seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusesConfig {
    pub tracked: FeatureSet,
    pub initial: BTreeMap<Feature, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Filter directives, e.g. `capable_notifications=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true, features: FeatureSet::ALL, observer_capacity: 64 }
    }
}

impl Default for StatusesConfig {
    fn default() -> Self {
        Self { tracked: FeatureSet::ALL, initial: BTreeMap::new() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false }
    }
}
