use std::borrow::Cow;

/// A specialized [`StatusesError`] enum of this crate.
#[capable_derive::capable_error]
pub enum StatusesError {
    /// The feature is not tracked by this table.
    #[error("Feature not tracked{}: {message}", format_context(.context))]
    Untracked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// An on/off status was requested for a feature that reports something else.
    #[error("Feature is not boolean{}: {message}", format_context(.context))]
    NotBoolean { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal statuses error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
