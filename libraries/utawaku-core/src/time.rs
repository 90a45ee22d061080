//! Human time strings <-> whole seconds
//!
//! Accepted input: `h:mm:ss`, `m:ss`, or plain seconds. Fractional seconds
//! are truncated. Output is `h:mm:ss` for an hour or more, `m:ss` otherwise.

use crate::error::TimeParseError;

/// Parse a time string into whole seconds
///
/// Empty input is zero seconds.
pub fn parse_time(input: &str) -> Result<u32, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let err = || TimeParseError(input.to_string());
    let parts: Vec<&str> = trimmed.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => (0, 0, parse_seconds(s).ok_or_else(err)?),
        [m, s] => (
            0,
            parse_component(m).ok_or_else(err)?,
            parse_seconds(s).ok_or_else(err)?,
        ),
        [h, m, s] => (
            parse_component(h).ok_or_else(err)?,
            parse_component(m).ok_or_else(err)?,
            parse_seconds(s).ok_or_else(err)?,
        ),
        _ => return Err(err()),
    };

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(err)
}

/// Format whole seconds for display
pub fn format_time(secs: u32) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Truncate a numeric field to whole seconds, as used by the CSV codec
///
/// Returns `None` for negative or non-numeric input.
pub(crate) fn truncate_seconds(value: &str) -> Option<u32> {
    parse_seconds(value.trim())
}

fn parse_component(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_seconds(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let value: f64 = s.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_forms() {
        assert_eq!(parse_time("45").unwrap(), 45);
        assert_eq!(parse_time("1:05").unwrap(), 65);
        assert_eq!(parse_time("1:02:03").unwrap(), 3723);
        assert_eq!(parse_time(" 12.9 ").unwrap(), 12);
        assert_eq!(parse_time("").unwrap(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time("abc").is_err());
        assert!(parse_time("1:xx").is_err());
        assert!(parse_time("-5").is_err());
        assert!(parse_time("1:2:3:4").is_err());
        assert!(parse_time("1::3").is_err());
    }

    #[test]
    fn formats_with_and_without_hours() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(3723), "1:02:03");
    }

    #[test]
    fn format_then_parse_is_identity() {
        for secs in [0, 59, 60, 599, 3599, 3600, 86_399, 100_000] {
            assert_eq!(parse_time(&format_time(secs)).unwrap(), secs);
        }
    }
}
