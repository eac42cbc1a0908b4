//! Parsing of element text into typed values.
//!
//! The registry data is authoritative, so a value that does not parse is an
//! error and never silently replaced by a default.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an `xs:boolean`.
///
/// # Examples
/// ```
/// use ruian_import::xml::parse_bool;
///
/// assert_eq!(parse_bool("true"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(text: &str) -> Result<bool, String> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

/// Parse an `xs:dateTime` (or a bare `xs:date`) into a naive timestamp.
///
/// Offsets are dropped and the local wall-clock time is kept, matching how
/// the registry publishes its validity dates.
///
/// # Examples
/// ```
/// use ruian_import::xml::parse_datetime;
///
/// let ts = parse_datetime("2013-06-21T00:00:00").unwrap();
/// assert_eq!(ts.to_string(), "2013-06-21 00:00:00");
/// ```
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, String> {
    let text = text.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.naive_local());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("'{text}' is not a date or date-time"))
}
