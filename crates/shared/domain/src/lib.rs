//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O, no async, no logging; data, collaborator contracts and simple helpers only.

pub mod config;
pub mod constants;
pub mod events;
pub mod features;
pub mod status;
