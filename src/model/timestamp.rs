//! Parsing of timestamps found in the time column and typed by the user.

use chrono::{DateTime, NaiveDateTime};

/// Format of time-window input fields and of the window label.
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `Mon Jan 02 15:04:05 2006` once the zone abbreviation is dropped.
const LOG_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Parse a value from the time column.
///
/// Accepts the `date(1)` style `Mon Jan 02 15:04:05 MST 2006` (optionally
/// followed by `:suffix`), `YYYY-MM-DD HH:MM:SS`, and RFC 3339. Zone
/// abbreviations are ignored; the result is wall-clock time.
pub fn parse_log_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(ts) = parse_any(raw) {
        return Some(ts);
    }
    // Logs often append a sequence number after the year: `...2006:42`.
    let (head, _) = raw.rsplit_once(':')?;
    parse_any(head.trim())
}

/// Parse a user-typed time-window bound.
pub fn parse_input_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), INPUT_FORMAT).ok()
}

/// Format a timestamp the way input fields expect it.
pub fn format_input_timestamp(ts: NaiveDateTime) -> String {
    ts.format(INPUT_FORMAT).to_string()
}

fn parse_any(raw: &str) -> Option<NaiveDateTime> {
    parse_date_style(raw)
        .or_else(|| parse_input_timestamp(raw))
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

fn parse_date_style(raw: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [weekday, month, day, clock, _zone, year] = parts.as_slice() else {
        return None;
    };
    let without_zone = format!("{weekday} {month} {day} {clock} {year}");
    NaiveDateTime::parse_from_str(&without_zone, LOG_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn parses_date_style_with_zone() {
        assert_eq!(
            parse_log_timestamp("Tue Mar 05 10:15:30 UTC 2024"),
            Some(at(10, 15, 30))
        );
    }

    #[test]
    fn parses_date_style_with_trailing_suffix() {
        assert_eq!(
            parse_log_timestamp("Tue Mar 05 10:15:30 PST 2024:981"),
            Some(at(10, 15, 30))
        );
    }

    #[test]
    fn parses_plain_iso_like_values() {
        assert_eq!(parse_log_timestamp("2024-03-05 10:00:00"), Some(at(10, 0, 0)));
        assert_eq!(
            parse_log_timestamp("2024-03-05T10:00:00+00:00"),
            Some(at(10, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_log_timestamp("yesterday"), None);
        assert_eq!(parse_log_timestamp(""), None);
        assert_eq!(parse_log_timestamp("   "), None);
    }

    #[test]
    fn input_format_round_trips() {
        let ts = at(23, 59, 1);
        assert_eq!(parse_input_timestamp(&format_input_timestamp(ts)), Some(ts));
    }
}
