use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment overrides (`CAPABLE__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "CAPABLE";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[capable_derive::capable_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// Sources, lowest priority first:
/// 1. **Defaults**: whatever `T`'s `#[serde(default)]` provides.
/// 2. **File**: optional; format inferred from the extension (TOML, YAML, JSON, ...).
///    A file that was asked for must exist.
/// 3. **Environment**: variables prefixed with `CAPABLE__`, nested keys joined with `__`
///    (`CAPABLE__NOTIFICATIONS__ENABLED` maps to `notifications.enabled`).
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    prefix: Cow<'static, str>,
    env: Option<config::Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self { file: None, prefix: Cow::Borrowed(ENV_PREFIX), env: None }
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required configuration file.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the environment variable prefix.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars(mut self, vars: config::Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Builds and deserializes the layered configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the
    /// merged values do not match `T`.
    pub fn load<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            info!(path = %path.display(), "Loading config");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        } else {
            debug!("No config file given, using defaults and environment");
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.prefix)
                .separator(ENV_SEPARATOR)
                .source(self.env),
        );

        let config = builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

/// Loads `T` from an optional file plus `CAPABLE__*` environment overrides.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust,no_run
/// use capable_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     verbose: bool,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}
