//! # Notification Center
//!
//! A typed, in-process notification center.
//!
//! Producers [`post`](NotificationCenter::post) plain Rust values; observers
//! [`subscribe`](NotificationCenter::subscribe) by type and receive every value
//! posted after they subscribed. Built on `tokio` broadcast channels, with a
//! `FxHashMap` registry behind a `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use capable_center::{CenterError, NotificationCenter, NotificationReceiverExt};
//!
//! #[derive(Debug)]
//! struct SettingToggled { name: &'static str }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), CenterError> {
//!     let center = NotificationCenter::new();
//!     let mut rx = center.subscribe::<SettingToggled>()?;
//!
//!     center.post(SettingToggled { name: "voice_over" })?;
//!
//!     if let Some(n) = rx.next_notification().await {
//!         assert_eq!(n.name, "voice_over");
//!     }
//!     Ok(())
//! }
//! ```

mod center;
mod error;
mod receiver;

pub use center::{DEFAULT_CAPACITY, Notification, NotificationCenter};
pub use error::{CenterError, CenterErrorExt};
pub use receiver::NotificationReceiverExt;
