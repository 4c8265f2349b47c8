//! Statuses feature slice.
//!
//! Holds the current status string of every tracked feature and exposes it
//! through [`StatusSource`](capable_domain::status::StatusSource).

mod error;
mod table;

pub use error::{StatusesError, StatusesErrorExt};
pub use table::StatusTable;
