use std::borrow::Cow;

/// Errors raised by the [`NotificationCenter`](crate::NotificationCenter).
#[capable_derive::capable_error]
pub enum CenterError {
    /// A registered channel does not carry the requested notification type.
    /// Indicates a broken invariant in the type registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Channel capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
