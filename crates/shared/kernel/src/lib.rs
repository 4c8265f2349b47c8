//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading plus a re-export of the domain models.
//!
//! ## Config loading
//! ```rust,no_run
//! use capable_kernel::config::load_config;
//! use capable_kernel::domain::config::CapableConfig;
//!
//! let cfg: CapableConfig = load_config(Some("capable.toml")).unwrap_or_default();
//! assert!(cfg.notifications.observer_capacity > 0);
//! ```

pub mod config;

pub use capable_domain as domain;
