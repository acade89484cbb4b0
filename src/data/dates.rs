//! Date Parsing
//! Permissive timestamp parser for the `Planned Start Date` text column.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Position of the year, month and day in a layout. A column keeps the
/// order of its first value, so `01/02/2024` and `13/02/2024` cannot end up
/// read month-first and day-first in the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    YearFirst,
    MonthFirst,
    DayFirst,
}

/// Date-time layouts tried in order. Slash dates are month-first, then day-first.
const DATETIME_FORMATS: [(DateOrder, &str); 10] = [
    (DateOrder::YearFirst, "%Y-%m-%d %H:%M:%S%.f"),
    (DateOrder::YearFirst, "%Y-%m-%dT%H:%M:%S%.f"),
    (DateOrder::YearFirst, "%Y-%m-%d %H:%M"),
    (DateOrder::YearFirst, "%Y-%m-%dT%H:%M"),
    (DateOrder::YearFirst, "%Y/%m/%d %H:%M:%S"),
    (DateOrder::MonthFirst, "%m/%d/%Y %H:%M:%S"),
    (DateOrder::MonthFirst, "%m/%d/%Y %H:%M"),
    (DateOrder::DayFirst, "%d/%m/%Y %H:%M:%S"),
    (DateOrder::DayFirst, "%d/%m/%Y %H:%M"),
    (DateOrder::DayFirst, "%d-%b-%Y %H:%M:%S"),
];

/// Date-only layouts, taken as midnight.
const DATE_FORMATS: [(DateOrder, &str); 7] = [
    (DateOrder::YearFirst, "%Y-%m-%d"),
    (DateOrder::YearFirst, "%Y/%m/%d"),
    (DateOrder::MonthFirst, "%m/%d/%Y"),
    (DateOrder::DayFirst, "%d/%m/%Y"),
    (DateOrder::DayFirst, "%d-%b-%Y"),
    (DateOrder::DayFirst, "%d %b %Y"),
    (DateOrder::DayFirst, "%d %B %Y"),
];

/// Parse a timestamp with any known layout and report which order matched.
/// Returns `None` when nothing matches.
pub fn parse_timestamp(text: &str) -> Option<(DateOrder, NaiveDateTime)> {
    parse_with(text, None)
}

/// Parse a timestamp using only layouts of the given order.
pub fn parse_timestamp_as(text: &str, order: DateOrder) -> Option<NaiveDateTime> {
    parse_with(text, Some(order)).map(|(_, ts)| ts)
}

fn parse_with(text: &str, order: Option<DateOrder>) -> Option<(DateOrder, NaiveDateTime)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let allowed = |candidate: DateOrder| order.map_or(true, |o| o == candidate);

    if allowed(DateOrder::YearFirst) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some((DateOrder::YearFirst, dt.naive_utc()));
        }
    }

    DATETIME_FORMATS
        .iter()
        .filter(|(o, _)| allowed(*o))
        .find_map(|(o, fmt)| NaiveDateTime::parse_from_str(text, fmt).ok().map(|ts| (*o, ts)))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter(|(o, _)| allowed(*o))
                .find_map(|(o, fmt)| {
                    NaiveDate::parse_from_str(text, fmt)
                        .ok()
                        .map(|d| (*o, d.and_time(NaiveTime::MIN)))
                })
        })
}

/// Milliseconds since the Unix epoch, the unit stored in the `Date` column.
pub fn to_millis(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_millis()
}

pub fn from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<NaiveDateTime> {
        parse_timestamp(text).map(|(_, ts)| ts)
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_iso_formats() {
        assert_eq!(
            parse("2024-01-15 09:30:00"),
            Some(ymd_hms(2024, 1, 15, 9, 30, 0))
        );
        assert_eq!(
            parse("2024-01-15T09:30:00"),
            Some(ymd_hms(2024, 1, 15, 9, 30, 0))
        );
        assert_eq!(
            parse("2024-01-15 09:30"),
            Some(ymd_hms(2024, 1, 15, 9, 30, 0))
        );
        assert_eq!(
            parse("2024-01-15"),
            Some(ymd_hms(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn test_fractional_seconds_and_offset() {
        let parsed = parse("2024-01-15 09:30:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);

        assert_eq!(
            parse("2024-01-15T10:30:00+01:00"),
            Some(ymd_hms(2024, 1, 15, 9, 30, 0))
        );
    }

    #[test]
    fn test_slash_dates_prefer_month_first() {
        assert_eq!(
            parse("02/03/2024"),
            Some(ymd_hms(2024, 2, 3, 0, 0, 0))
        );
        // 25 cannot be a month, so the day-first layout applies.
        assert_eq!(
            parse("25/03/2024 14:00"),
            Some(ymd_hms(2024, 3, 25, 14, 0, 0))
        );
    }

    #[test]
    fn test_reports_matched_order() {
        assert_eq!(
            parse_timestamp("2024-01-15 09:30").map(|(o, _)| o),
            Some(DateOrder::YearFirst)
        );
        assert_eq!(
            parse_timestamp("01/02/2024").map(|(o, _)| o),
            Some(DateOrder::MonthFirst)
        );
        assert_eq!(
            parse_timestamp("13/02/2024").map(|(o, _)| o),
            Some(DateOrder::DayFirst)
        );
    }

    #[test]
    fn test_fixed_order_rejects_other_layouts() {
        assert_eq!(
            parse_timestamp_as("01/02/2024", DateOrder::DayFirst),
            Some(ymd_hms(2024, 2, 1, 0, 0, 0))
        );
        assert_eq!(parse_timestamp_as("13/02/2024", DateOrder::MonthFirst), None);
        assert_eq!(parse_timestamp_as("2024-02-13", DateOrder::DayFirst), None);
        assert_eq!(
            parse_timestamp_as("2024-02-13T08:00:00Z", DateOrder::YearFirst),
            Some(ymd_hms(2024, 2, 13, 8, 0, 0))
        );
    }

    #[test]
    fn test_named_months() {
        assert_eq!(
            parse("05-Feb-2024"),
            Some(ymd_hms(2024, 2, 5, 0, 0, 0))
        );
        assert_eq!(
            parse("5 February 2024"),
            Some(ymd_hms(2024, 2, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("next tuesday"), None);
        assert_eq!(parse("2024-13-40"), None);
    }

    #[test]
    fn test_millis_conversion() {
        let ts = ymd_hms(2024, 1, 1, 12, 0, 0);
        assert_eq!(from_millis(to_millis(ts)), Some(ts));
    }
}
