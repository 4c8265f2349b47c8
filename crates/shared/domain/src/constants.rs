//! Well-known status strings and feature set aliases.

/// Status of a boolean feature that is switched on.
pub const ENABLED: &str = "enabled";
/// Status of a boolean feature that is switched off.
pub const DISABLED: &str = "disabled";

/// Aliases accepted wherever a feature set is parsed from text.
pub const ALL_FEATURES: &[&str] = &["all", "*"];
