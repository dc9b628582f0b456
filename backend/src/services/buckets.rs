//! Time-series bucketing on UTC calendar days.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::{Granularity, TimeBucket, TimeSeries};
use crate::models::{day_key, day_label, YearMonth};

/// Longest accepted daily window, about ten years.
pub const MAX_DAILY_DAYS: u32 = 3660;
/// Longest accepted weekly window, about ten years.
pub const MAX_WEEKLY_WEEKS: u32 = 520;
/// Longest accepted monthly window, one hundred years.
pub const MAX_MONTHLY_MONTHS: u32 = 1200;

/// Trailing window lengths for the three series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketWindows {
    #[serde(default = "default_daily_days")]
    pub daily_days: u32,
    #[serde(default = "default_weekly_weeks")]
    pub weekly_weeks: u32,
    #[serde(default = "default_monthly_months")]
    pub monthly_months: u32,
}

fn default_daily_days() -> u32 {
    30
}

fn default_weekly_weeks() -> u32 {
    12
}

fn default_monthly_months() -> u32 {
    12
}

impl Default for BucketWindows {
    fn default() -> Self {
        Self {
            daily_days: default_daily_days(),
            weekly_weeks: default_weekly_weeks(),
            monthly_months: default_monthly_months(),
        }
    }
}

/// The three series produced from one set of dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSet {
    pub daily: TimeSeries,
    pub weekly: TimeSeries,
    pub monthly: TimeSeries,
}

/// Per-UTC-day counts, ordered by day.
pub type DayCounts = BTreeMap<NaiveDate, usize>;

/// Count instants per UTC calendar day.
pub fn count_by_day<I>(instants: I) -> DayCounts
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut counts = DayCounts::new();
    for instant in instants {
        *counts.entry(instant.date_naive()).or_insert(0) += 1;
    }
    counts
}

fn sum_range(counts: &DayCounts, start: NaiveDate, end: NaiveDate) -> usize {
    if start > end {
        return 0;
    }
    counts.range(start..=end).map(|(_, count)| *count).sum()
}

fn days_before(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    day.checked_sub_signed(Duration::days(days))
}

/// Trailing `days` UTC days ending on `today`, oldest first.
///
/// The window is capped at [`MAX_DAILY_DAYS`]; days before the earliest
/// representable date are left out.
pub fn daily_series(counts: &DayCounts, today: NaiveDate, days: u32) -> TimeSeries {
    let buckets = (0..days.min(MAX_DAILY_DAYS))
        .rev()
        .filter_map(|offset| {
            let day = days_before(today, i64::from(offset))?;
            Some(TimeBucket {
                key: day_key(day),
                label: day_label(day),
                start: day,
                end: day,
                count: counts.get(&day).copied().unwrap_or(0),
            })
        })
        .collect();

    TimeSeries {
        granularity: Granularity::Daily,
        buckets,
    }
}

/// Trailing `weeks` seven-day windows; window `i` ends on `today - 7*i`.
///
/// Capped at [`MAX_WEEKLY_WEEKS`] like the daily window.
pub fn weekly_series(counts: &DayCounts, today: NaiveDate, weeks: u32) -> TimeSeries {
    let buckets = (0..weeks.min(MAX_WEEKLY_WEEKS))
        .rev()
        .filter_map(|index| {
            let end = days_before(today, 7 * i64::from(index))?;
            let start = days_before(end, 6)?;
            Some(TimeBucket {
                key: day_key(end),
                label: format!("{} - {}", day_label(start), day_label(end)),
                start,
                end,
                count: sum_range(counts, start, end),
            })
        })
        .collect();

    TimeSeries {
        granularity: Granularity::Weekly,
        buckets,
    }
}

/// Trailing `months` calendar months including the current one.
///
/// Each month counts every day it contains, so dates later in the current
/// month are included. Capped at [`MAX_MONTHLY_MONTHS`].
pub fn monthly_series(counts: &DayCounts, today: NaiveDate, months: u32) -> TimeSeries {
    let current = YearMonth::of(today);
    let buckets = (0..months.min(MAX_MONTHLY_MONTHS))
        .rev()
        .filter_map(|offset| {
            let month = current.shifted(-i64::from(offset));
            let start = month.first_day()?;
            let end = month.last_day()?;
            Some(TimeBucket {
                key: month.key(),
                label: month.label(),
                start,
                end,
                count: sum_range(counts, start, end),
            })
        })
        .collect();

    TimeSeries {
        granularity: Granularity::Monthly,
        buckets,
    }
}

/// Build all three series from dated in-scope assets.
pub fn bucketize(counts: &DayCounts, now: DateTime<Utc>, windows: &BucketWindows) -> SeriesSet {
    let today = now.date_naive();
    let series = SeriesSet {
        daily: daily_series(counts, today, windows.daily_days),
        weekly: weekly_series(counts, today, windows.weekly_weeks),
        monthly: monthly_series(counts, today, windows.monthly_months),
    };
    log::debug!(
        "Bucketed {} dated assets: daily={} weekly={} monthly={}",
        counts.values().sum::<usize>(),
        series.daily.total(),
        series.weekly.total(),
        series.monthly.total()
    );
    series
}
