//! Bucket file naming conventions.
//!
//! Pure string functions with no filesystem access. A bucket holds every record
//! for one (service, UTC day) pair and lives at `{service}-{YYYY-MM-DD}.json`
//! under the storage root.

use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::error::CoreError;

pub const SEPARATOR: char = '-';

pub const EXTENSION: &str = ".json";

/// `-YYYY-MM-DD.json`
const SUFFIX_LEN: usize = 1 + 10 + EXTENSION.len();

/// Longest accepted service name in bytes. The bucket file name and its
/// `.tmp` sibling must both fit in a 255-byte file name.
pub const MAX_SERVICE_NAME_LEN: usize = 255 - SUFFIX_LEN - ".tmp".len();

/// Reject names that cannot safely become a single path component.
pub fn validate_service_name(name: &str) -> Result<(), CoreError> {
    let invalid = name.trim().is_empty()
        || name.len() > MAX_SERVICE_NAME_LEN
        || name != name.trim()
        || name == "."
        || name.contains("..")
        || name.chars().any(|c| c == '/' || c == '\\' || c.is_control());

    if invalid {
        return Err(CoreError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}

pub fn bucket_file_name(service_name: &str, date: Date) -> String {
    format!("{service_name}{SEPARATOR}{}{EXTENSION}", format_date(date))
}

/// Split a bucket filename back into its service name and date.
///
/// The date is a fixed-width suffix, so service names that themselves
/// contain the separator (`auth-api-2024-01-01.json`) are recovered intact.
/// Returns `None` for anything that is not a bucket file.
pub fn parse_bucket_file_name(file_name: &str) -> Option<(&str, Date)> {
    if !file_name.ends_with(EXTENSION) || file_name.len() <= SUFFIX_LEN {
        return None;
    }
    let split = file_name.len() - SUFFIX_LEN;
    let (service, suffix) = (file_name.get(..split)?, file_name.get(split..)?);

    let date_str = suffix.strip_prefix(SEPARATOR)?.strip_suffix(EXTENSION)?;
    let date = parse_date(date_str).ok()?;
    validate_service_name(service).ok()?;

    Some((service, date))
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<Date, CoreError> {
    let shaped = s.len() == 10
        && s.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shaped {
        return Err(CoreError::InvalidDate(s.to_string()));
    }
    s.parse::<Date>()
        .map_err(|_| CoreError::InvalidDate(s.to_string()))
}

pub fn format_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}

/// The UTC calendar day containing `timestamp`.
pub fn utc_date(timestamp: jiff::Timestamp) -> Date {
    timestamp.to_zoned(TimeZone::UTC).date()
}

/// Today's date in UTC.
pub fn today() -> Date {
    utc_date(jiff::Timestamp::now())
}
