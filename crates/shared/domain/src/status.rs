//! Status source contract.

use crate::features::{Feature, FeatureSet};
use std::sync::Arc;

/// Reports the current status string of features.
///
/// Implementations are shared between the host (which updates them) and
/// notifiers (which read them), hence `Send + Sync` and the blanket impl for `Arc`.
pub trait StatusSource: Send + Sync {
    /// Current status of `feature`, or `None` when it is unknown or not tracked.
    fn status(&self, feature: Feature) -> Option<String>;

    /// Features this source reports on.
    fn tracked(&self) -> FeatureSet {
        FeatureSet::ALL
    }
}

impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    fn status(&self, feature: Feature) -> Option<String> {
        (**self).status(feature)
    }

    fn tracked(&self) -> FeatureSet {
        (**self).tracked()
    }
}
