#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the capable workspace.
//!
//! Every crate declares its error enum through [`macro@capable_error`], so all of them
//! share the same shape: a `message` or `source` payload plus an optional `context`.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a crate error type.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]`, unless already derived.
/// * A companion `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and, for every
///   variant holding a `source`, for `Result<T, Source>` too.
/// * `From<Source>` for each variant holding a `source` (so `?` works).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper to be used inside `#[error(...)]` strings.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field must be `Option<Cow<'static, str>>`.
/// * A variant holding a `source` must also hold a `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[capable_derive::capable_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Reading store file")
/// }
/// ```
#[proc_macro_attribute]
pub fn capable_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
