use capable_kernel::config::{ConfigError, ConfigLoader, load_config};
use capable_kernel::domain::config::CapableConfig;
use capable_kernel::domain::features::{Feature, FeatureSet};
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r#"
[notifications]
enabled = true
features = ["voice_over", "larger_text"]
observer_capacity = 8

[statuses]
tracked = "all"

[statuses.initial]
voice_over = "disabled"
larger_text = "medium"

[logging]
level = "debug"
"#;

fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("capable.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: CapableConfig = ConfigLoader::new().file(&path).env_vars(vars(&[])).load()?;

    assert_eq!(cfg.notifications.features, FeatureSet::VOICE_OVER | FeatureSet::LARGER_TEXT);
    assert_eq!(cfg.notifications.observer_capacity, 8);
    assert_eq!(cfg.statuses.initial.get(&Feature::LargerText).map(String::as_str), Some("medium"));
    assert_eq!(cfg.logging.level, "debug");
    Ok(())
}

#[test]
fn environment_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("capable.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: CapableConfig = ConfigLoader::new()
        .file(&path)
        .env_vars(vars(&[
            ("CAPABLE__NOTIFICATIONS__ENABLED", "false"),
            ("CAPABLE__LOGGING__LEVEL", "warn"),
            ("OTHER__LOGGING__LEVEL", "trace"),
        ]))
        .load()?;

    assert!(!cfg.notifications.enabled);
    assert_eq!(cfg.logging.level, "warn");
    Ok(())
}

#[test]
fn environment_values_are_coerced_to_field_types() -> Result<(), ConfigError> {
    let cfg: CapableConfig = ConfigLoader::new()
        .env_vars(vars(&[
            ("CAPABLE__NOTIFICATIONS__ENABLED", "false"),
            ("CAPABLE__NOTIFICATIONS__OBSERVER_CAPACITY", "8"),
            ("CAPABLE__STATUSES__TRACKED", "3"),
            ("CAPABLE__NOTIFICATIONS__FEATURES", "voice_over,bold_text"),
            ("CAPABLE__STATUSES__INITIAL__LARGER_TEXT", "large"),
            ("CAPABLE__LOGGING__PATH", "/var/log/capable"),
        ]))
        .load()?;

    assert!(!cfg.notifications.enabled);
    assert_eq!(cfg.notifications.observer_capacity, 8);
    assert_eq!(cfg.statuses.tracked, FeatureSet::ASSISTIVE_TOUCH | FeatureSet::BOLD_TEXT);
    assert_eq!(cfg.notifications.features, FeatureSet::VOICE_OVER | FeatureSet::BOLD_TEXT);
    assert_eq!(cfg.statuses.initial.get(&Feature::LargerText).map(String::as_str), Some("large"));
    assert_eq!(cfg.logging.path.as_deref(), Some(std::path::Path::new("/var/log/capable")));
    Ok(())
}

#[test]
fn malformed_environment_value_is_an_error() {
    let result = ConfigLoader::new()
        .env_vars(vars(&[("CAPABLE__NOTIFICATIONS__OBSERVER_CAPACITY", "plenty")]))
        .load::<CapableConfig>();

    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
fn no_file_means_defaults() -> Result<(), ConfigError> {
    let cfg: CapableConfig = ConfigLoader::new().env_vars(vars(&[])).load()?;

    assert!(cfg.notifications.enabled);
    assert_eq!(cfg.statuses.tracked, FeatureSet::ALL);
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}

#[test]
fn custom_prefix_is_honoured() -> Result<(), ConfigError> {
    let cfg: CapableConfig = ConfigLoader::new()
        .env_prefix("DEMO")
        .env_vars(vars(&[("DEMO__LOGGING__JSON", "true")]))
        .load()?;

    assert!(cfg.logging.json);
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let result = load_config::<CapableConfig>(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}
