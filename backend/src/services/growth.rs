//! Growth, streak, average and peak/trough metrics over a bucket series.

use crate::api::{SeriesTrend, TimeBucket, TimeSeries};

/// Percent change between the last two buckets.
///
/// The denominator is clamped to at least 1, so `[0, 0]` is 0%, `[0, 5]` is
/// 500% and `[5, 0]` is -100%. Fewer than two buckets yields 0.
pub fn growth_percent(counts: &[usize]) -> f64 {
    match counts {
        [.., prev, last] => (*last as f64 - *prev as f64) / (*prev).max(1) as f64 * 100.0,
        _ => 0.0,
    }
}

/// Consecutive non-zero buckets counted backward from the latest one.
pub fn streak(counts: &[usize]) -> usize {
    counts.iter().rev().take_while(|&&count| count > 0).count()
}

/// Arithmetic mean over the full window; 0 for an empty window.
pub fn average(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Bucket with the highest count; ties keep the earliest.
pub fn peak(series: &TimeSeries) -> Option<&TimeBucket> {
    series.buckets.iter().fold(None, |best, bucket| match best {
        Some(current) if current.count >= bucket.count => Some(current),
        _ => Some(bucket),
    })
}

/// Bucket with the lowest count; ties keep the earliest.
pub fn trough(series: &TimeSeries) -> Option<&TimeBucket> {
    series.buckets.iter().fold(None, |best, bucket| match best {
        Some(current) if current.count <= bucket.count => Some(current),
        _ => Some(bucket),
    })
}

/// All trend metrics for one series.
pub fn summarize(series: &TimeSeries) -> SeriesTrend {
    let counts = series.counts();
    SeriesTrend {
        growth_percent: growth_percent(&counts),
        average: average(&counts),
        peak_label: peak(series).map(|b| b.label.clone()),
        trough_label: trough(series).map(|b| b.label.clone()),
        streak: streak(&counts),
    }
}
