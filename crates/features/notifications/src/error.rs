use capable_center::CenterError;
use std::borrow::Cow;

/// Notifications slice error type.
#[capable_derive::capable_error]
pub enum NotificationsError {
    /// The notification center refused the operation.
    #[error("Notification delivery error{}: {source}", format_context(.context))]
    Delivery { source: CenterError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal notifications error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
