use crate::error::StatusesError;
use capable_domain::config::StatusesConfig;
use capable_domain::constants::{DISABLED, ENABLED};
use capable_domain::features::{Feature, FeatureSet};
use capable_domain::status::StatusSource;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
struct StatusTableInner {
    tracked: FeatureSet,
    statuses: RwLock<FxHashMap<Feature, String>>,
}

/// Thread-safe table of feature statuses. Clones share the same table.
#[derive(Debug, Clone)]
pub struct StatusTable {
    inner: Arc<StatusTableInner>,
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::new(FeatureSet::ALL)
    }
}

impl StatusTable {
    /// Creates an empty table tracking `tracked`.
    pub fn new(tracked: FeatureSet) -> Self {
        Self {
            inner: Arc::new(StatusTableInner { tracked, statuses: RwLock::default() }),
        }
    }

    /// Creates a table seeded from configuration.
    ///
    /// Initial entries for untracked features are skipped.
    pub fn from_config(config: &StatusesConfig) -> Self {
        let table = Self::new(config.tracked);

        {
            let mut statuses = table.inner.statuses.write();
            for (feature, status) in &config.initial {
                if config.tracked.has(*feature) {
                    statuses.insert(*feature, status.clone());
                } else {
                    warn!(%feature, "Ignoring initial status of untracked feature");
                }
            }
        }

        debug!(tracked = config.tracked.bits(), seeded = table.len(), "Status table created");
        table
    }

    /// Stores the status of `feature`, returning the previous one.
    ///
    /// # Errors
    /// Returns [`StatusesError::Untracked`] if `feature` is not tracked.
    pub fn set(
        &self,
        feature: Feature,
        status: impl Into<String>,
    ) -> Result<Option<String>, StatusesError> {
        self.ensure_tracked(feature)?;
        let status = status.into();

        debug!(%feature, %status, "Status updated");
        Ok(self.inner.statuses.write().insert(feature, status))
    }

    /// Stores [`ENABLED`] or [`DISABLED`] for an on/off feature.
    ///
    /// # Errors
    /// Returns [`StatusesError::NotBoolean`] for features such as `LargerText`,
    /// or [`StatusesError::Untracked`].
    pub fn set_enabled(
        &self,
        feature: Feature,
        enabled: bool,
    ) -> Result<Option<String>, StatusesError> {
        if !feature.is_boolean() {
            return Err(StatusesError::NotBoolean { message: feature.name().into(), context: None });
        }
        self.set(feature, if enabled { ENABLED } else { DISABLED })
    }

    /// Forgets the status of `feature`, returning it.
    pub fn clear(&self, feature: Feature) -> Option<String> {
        self.inner.statuses.write().remove(&feature)
    }

    /// `Some(true)`/`Some(false)` for a known on/off status, `None` otherwise.
    pub fn is_enabled(&self, feature: Feature) -> Option<bool> {
        match self.inner.statuses.read().get(&feature).map(String::as_str) {
            Some(ENABLED) => Some(true),
            Some(DISABLED) => Some(false),
            _ => None,
        }
    }

    /// Snapshot of every known status, ordered by feature.
    pub fn status_map(&self) -> BTreeMap<Feature, String> {
        self.inner.statuses.read().iter().map(|(f, s)| (*f, s.clone())).collect()
    }

    /// Number of features with a known status.
    pub fn len(&self) -> usize {
        self.inner.statuses.read().len()
    }

    fn ensure_tracked(&self, feature: Feature) -> Result<(), StatusesError> {
        if self.inner.tracked.has(feature) {
            Ok(())
        } else {
            Err(StatusesError::Untracked { message: feature.name().into(), context: None })
        }
    }
}

impl StatusSource for StatusTable {
    fn status(&self, feature: Feature) -> Option<String> {
        self.inner.statuses.read().get(&feature).cloned()
    }

    fn tracked(&self) -> FeatureSet {
        self.inner.tracked
    }
}
