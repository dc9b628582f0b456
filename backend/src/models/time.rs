//! UTC calendar helpers and the `event_date` parsing policy.
//!
//! Every date-keyed view in the engine is computed on UTC calendar days so
//! that a given snapshot buckets identically for viewers in any timezone.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw values that upstream metadata uses for "no date yet".
pub const DEFAULT_DATE_PLACEHOLDERS: &[&str] = &[
    "tbd",
    "tba",
    "n/a",
    "na",
    "none",
    "null",
    "undefined",
    "invalid date",
    "0",
    "-",
];

/// Naive layouts tried after RFC 3339, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Rules for turning a raw `event_date` string into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePolicy {
    /// Case-insensitive sentinel values that never parse.
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
    /// Treat the Unix epoch as an unfilled template value.
    #[serde(default = "default_reject_epoch")]
    pub reject_epoch: bool,
}

fn default_placeholders() -> Vec<String> {
    DEFAULT_DATE_PLACEHOLDERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_reject_epoch() -> bool {
    true
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            placeholders: default_placeholders(),
            reject_epoch: default_reject_epoch(),
        }
    }
}

impl DatePolicy {
    /// True when `raw` is blank, a `{...}` template slot, or a listed sentinel.
    pub fn is_placeholder(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return true;
        }
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            return true;
        }
        self.placeholders
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(trimmed))
    }

    /// Parse an optional raw date, returning `None` for anything unusable.
    pub fn parse(&self, raw: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = raw?;
        if self.is_placeholder(raw) {
            return None;
        }
        let instant = parse_instant(raw.trim())?;
        if self.reject_epoch && instant.timestamp() == 0 {
            return None;
        }
        Some(instant)
    }
}

/// Parse an ISO-8601 style string (or epoch milliseconds) into a UTC instant.
///
/// Accepted, in order: RFC 3339 with any offset, naive date-time (UTC),
/// plain `YYYY-MM-DD` (midnight UTC), and a run of at least ten digits read
/// as Unix milliseconds.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if raw.len() >= 10 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = raw.parse().ok()?;
        return DateTime::from_timestamp_millis(millis);
    }

    None
}

/// Bucket key for a UTC day, `YYYY-MM-DD`.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short display label for a day, e.g. `Apr 20`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// A calendar month, addressed by year and 1-based month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing the UTC day of `instant`.
    pub fn of_instant(instant: DateTime<Utc>) -> Self {
        Self::of(instant.date_naive())
    }

    /// Shift by a signed number of months; the year saturates at the `i32` bounds.
    pub fn shifted(self, delta: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + delta;
        let year = index
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self {
            year,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }

    /// `None` when the month lies outside chrono's representable dates.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// `None` when the month lies outside chrono's representable dates.
    pub fn last_day(self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// Zero for a month that cannot be represented.
    pub fn num_days(self) -> u32 {
        self.last_day().map_or(0, |day| day.day())
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every day of the month, in order; empty for an unrepresentable month.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.num_days()).filter_map(move |offset| {
            first?.checked_add_signed(Duration::days(i64::from(offset)))
        })
    }

    /// Bucket key, `YYYY-MM`.
    pub fn key(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Display label, e.g. `Apr 2025`; falls back to the key.
    pub fn label(self) -> String {
        match self.first_day() {
            Some(first) => first.format("%b %Y").to_string(),
            None => self.key(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc() {
        let parsed = parse_instant("2025-04-20T10:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 4, 20, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_offset_normalises_to_utc() {
        // 01:30 at +05:00 is still the previous UTC day
        let parsed = parse_instant("2025-04-21T01:30:00+05:00").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2025, 4, 20).unwrap());
    }

    #[test]
    fn test_parse_naive_and_plain_dates() {
        assert!(parse_instant("2025-04-20T10:00:00").is_some());
        assert!(parse_instant("2025-04-20 10:00:00.250").is_some());
        let midnight = parse_instant("2025-04-20").unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2025, 4, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_epoch_millis() {
        let parsed = parse_instant("1745143200000").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 4, 20, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_instant("not-a-date").is_none());
        assert!(parse_instant("2025-13-40").is_none());
        assert!(parse_instant("12345").is_none());
    }

    #[test]
    fn test_policy_rejects_placeholders() {
        let policy = DatePolicy::default();
        assert!(policy.parse(None).is_none());
        assert!(policy.parse(Some("")).is_none());
        assert!(policy.parse(Some("  TBD ")).is_none());
        assert!(policy.parse(Some("Invalid Date")).is_none());
        assert!(policy.parse(Some("{event_date}")).is_none());
        assert!(policy.parse(Some("1970-01-01T00:00:00Z")).is_none());
        assert!(policy.parse(Some("2025-04-20T10:00:00Z")).is_some());
    }

    #[test]
    fn test_policy_epoch_allowed_when_configured() {
        let policy = DatePolicy {
            reject_epoch: false,
            ..DatePolicy::default()
        };
        assert!(policy.parse(Some("1970-01-01T00:00:00Z")).is_some());
    }

    #[test]
    fn test_year_month_shift_across_years() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.shifted(-1), YearMonth::new(2024, 12).unwrap());
        assert_eq!(jan.shifted(11), YearMonth::new(2025, 12).unwrap());
        assert_eq!(jan.shifted(12), YearMonth::new(2026, 1).unwrap());
        assert_eq!(jan.shifted(-25), YearMonth::new(2022, 12).unwrap());
    }

    #[test]
    fn test_year_month_days() {
        let feb_leap = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb_leap.num_days(), 29);
        assert_eq!(feb_leap.days().count(), 29);
        assert_eq!(YearMonth::new(2025, 2).unwrap().num_days(), 28);
        assert!(YearMonth::new(2025, 13).is_none());
    }

    #[test]
    fn test_unrepresentable_month_has_no_days() {
        let far = YearMonth::new(2025, 1).unwrap().shifted(-10_000_000);
        assert_eq!(far.first_day(), None);
        assert_eq!(far.last_day(), None);
        assert_eq!(far.num_days(), 0);
        assert_eq!(far.days().count(), 0);
        assert_eq!(far.label(), far.key());

        let saturated = YearMonth::new(2025, 1).unwrap().shifted(i64::MIN / 2);
        assert_eq!(saturated.year, i32::MIN);
        assert_eq!(YearMonth::new(2024, 12).unwrap().last_day(), NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_keys_and_labels() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        assert_eq!(day_key(day), "2025-04-05");
        assert_eq!(day_label(day), "Apr 5");
        let month = YearMonth::of(day);
        assert_eq!(month.key(), "2025-04");
        assert_eq!(month.label(), "Apr 2025");
        assert_eq!(month.to_string(), "2025-04");
    }
}
