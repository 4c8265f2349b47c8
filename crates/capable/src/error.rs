use capable_center::CenterError;
use capable_notifications::NotificationsError;
use capable_statuses::StatusesError;
use std::borrow::Cow;

#[capable_derive::capable_error]
pub enum CapableError {
    #[error("Status error{}: {source}", format_context(.context))]
    Statuses { source: StatusesError, context: Option<Cow<'static, str>> },
    #[error("Notifications error{}: {source}", format_context(.context))]
    Notifications { source: NotificationsError, context: Option<Cow<'static, str>> },
    #[error("Notification center error{}: {source}", format_context(.context))]
    Center { source: CenterError, context: Option<Cow<'static, str>> },
}
