use capable::domain::features::Feature;
use std::borrow::Cow;
use std::str::FromStr;

#[capable_derive::capable_error]
pub(crate) enum CommandError {
    #[error("Malformed line{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Unknown feature{}: {message}", format_context(.context))]
    UnknownFeature { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// One `<feature> <status>` input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusUpdate {
    pub(crate) feature: Feature,
    pub(crate) status: String,
}

/// Parses an input line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<StatusUpdate>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some((name, status)) = line.split_once(char::is_whitespace) else {
        return Err(CommandError::Malformed {
            message: format!("'{line}'").into(),
            context: Some("Expected '<feature> <status>'".into()),
        });
    };

    let feature = Feature::from_str(name)
        .map_err(|_| CommandError::UnknownFeature { message: name.to_owned().into(), context: None })?;

    Ok(Some(StatusUpdate { feature, status: status.trim().to_owned() }))
}
