//! Current date and time for `goblin time`.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::{self, Write};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("unsupported strftime format: {format:?}")]
    InvalidFormat { format: String },
}

/// Format `time` with strftime(3) specifiers.
///
/// The format is validated up front; chrono panics when displaying an
/// invalid format.
pub fn format_time<Tz>(time: &DateTime<Tz>, format: &str) -> Result<String, TimeFormatError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let invalid = || TimeFormatError::InvalidFormat {
        format: format.to_string(),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", time.format_with_items(items.iter())).map_err(|_| invalid())?;
    Ok(out)
}

/// Local time, formatted.
pub fn format_now(format: &str) -> Result<String, TimeFormatError> {
    format_time(&Local::now(), format)
}

/// Seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_format_date_time() {
        let out = format_time(&fixed(), "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(out, "2024-01-02 03:04:05");
    }

    #[test]
    fn test_format_epoch_specifier() {
        assert_eq!(format_time(&fixed(), "%s").unwrap(), "1704164645");
    }

    #[test]
    fn test_literal_text_kept() {
        assert_eq!(format_time(&fixed(), "build-%Y").unwrap(), "build-2024");
    }

    #[test]
    fn test_empty_format() {
        assert_eq!(format_time(&fixed(), "").unwrap(), "");
    }

    #[test]
    fn test_trailing_percent_rejected() {
        let err = format_time(&fixed(), "%Y %").unwrap_err();
        assert_eq!(
            err,
            TimeFormatError::InvalidFormat {
                format: "%Y %".to_string()
            }
        );
    }

    #[test]
    fn test_unix_now_is_recent() {
        // 2020-09-13, well before any machine running these tests
        assert!(unix_now() > 1_600_000_000);
    }
}
