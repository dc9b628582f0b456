//! Public API surface for the engine.
//!
//! This file consolidates the output types handed to presentation layers.
//! All types derive Serialize/Deserialize for JSON serialization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use crate::models::{
    CollectionId, CollectionRef, DisplayMetadata, DisplayScopeConfig, EventDef, EventId,
    ObjectId, OwnedAsset, OwnerRef, YearMonth,
};

/// Global minted count per collection, independent of any wallet.
pub type OnchainCounts = HashMap<CollectionId, u64>;

// =========================================================
// Time series
// =========================================================

/// Width of one bucket in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

/// One time-window slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// `YYYY-MM-DD` (daily, and weekly by window end) or `YYYY-MM` (monthly).
    pub key: String,
    /// Display-only text.
    pub label: String,
    /// First UTC day covered, inclusive.
    pub start: NaiveDate,
    /// Last UTC day covered, inclusive.
    pub end: NaiveDate,
    pub count: usize,
}

/// Buckets ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    pub buckets: Vec<TimeBucket>,
}

impl TimeSeries {
    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.count).collect()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn bucket(&self, key: &str) -> Option<&TimeBucket> {
        self.buckets.iter().find(|b| b.key == key)
    }
}

/// Derived metrics for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTrend {
    /// `(last - prev) / max(prev, 1) * 100`.
    pub growth_percent: f64,
    /// Mean count per bucket across the whole window.
    pub average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trough_label: Option<String>,
    /// Consecutive non-zero buckets ending at the latest one.
    pub streak: usize,
}

// =========================================================
// Collections
// =========================================================

/// Per-collection holdings roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub collection_id: CollectionId,
    pub name: String,
    /// In-scope, event-bound assets of this collection.
    pub total_mints: usize,
    /// Every snapshot asset matched to this collection.
    pub owned_count: usize,
    /// Global minted count reported on chain.
    pub onchain_count: u64,
    /// Share of holdings that are event-registered, in percent.
    pub trend_percent: f64,
}

// =========================================================
// Activity stats
// =========================================================

/// Complete engagement analytics for one wallet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub generated_at: DateTime<Utc>,
    pub daily: TimeSeries,
    pub weekly: TimeSeries,
    pub monthly: TimeSeries,
    pub daily_trend: SeriesTrend,
    pub weekly_trend: SeriesTrend,
    pub monthly_trend: SeriesTrend,
    /// Weekly participation streak.
    pub streak_weeks: usize,
    pub collections: Vec<CollectionStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_active_collection: Option<CollectionId>,
    /// Assets in the snapshot after de-duplication by object id.
    pub owned_count: usize,
    pub in_scope_count: usize,
    /// In-scope assets left out of every series for lack of a usable date.
    pub undated_in_scope: usize,
    /// Assets that qualified but were held in a kiosk while kiosks are excluded.
    pub custody_excluded: usize,
}

// =========================================================
// Calendar
// =========================================================

/// An in-scope asset placed on the day of its bound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarParticipation {
    pub object_id: ObjectId,
    pub event_id: EventId,
    pub event_name: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// An event that has not started yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub event_id: EventId,
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_capacity: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`.
    pub key: String,
    pub participations: Vec<CalendarParticipation>,
    pub upcoming: Vec<UpcomingEvent>,
}

impl CalendarDay {
    pub fn is_empty(&self) -> bool {
        self.participations.is_empty() && self.upcoming.is_empty()
    }
}

/// Month grid of participation and upcoming events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarProjection {
    pub month: YearMonth,
    /// Weekday offset of day 1 in a Sunday-first grid.
    pub leading_blank_days: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarProjection {
    pub fn day(&self, key: &str) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.key == key)
    }

    pub fn participation_count(&self) -> usize {
        self.days.iter().map(|d| d.participations.len()).sum()
    }

    pub fn upcoming_count(&self) -> usize {
        self.days.iter().map(|d| d.upcoming.len()).sum()
    }
}
