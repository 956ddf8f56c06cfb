use crate::error::AppError;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Canonical user-facing and on-disk datetime pattern.
pub const PATTERN_HINT: &str = "yyyy-MM-dd HH:mm";

const MINUTE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const SECOND_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parses a datetime in the `yyyy-MM-dd HH:mm` form. An explicit
/// seconds component is tolerated but never produced by `format_datetime`.
pub fn parse_datetime(text: &str) -> Result<Timestamp, AppError> {
    let trimmed = text.trim();

    // The documented form stops at minutes; widen it so the parser sees
    // a complete time.
    let widened;
    let candidate = if trimmed.matches(':').count() == 1 {
        widened = format!("{trimmed}:00");
        widened.as_str()
    } else {
        trimmed
    };

    PrimitiveDateTime::parse(candidate, SECOND_FORMAT).map_err(|_| {
        AppError::date_format(format!(
            "cannot read \"{trimmed}\" as a datetime; try the form {PATTERN_HINT}"
        ))
    })
}

/// Formats a datetime in the canonical minute-precision form.
pub fn format_datetime(moment: Timestamp) -> Result<String, AppError> {
    moment
        .format(MINUTE_FORMAT)
        .map_err(|err| AppError::date_format(err.to_string()))
}

/// The timestamp type carried by deadlines and events. The command
/// surface has no zone concept, so a naive datetime fits.
pub type Timestamp = PrimitiveDateTime;
