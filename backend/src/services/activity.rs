//! Engine entry points: activity statistics and calendar projection.
//!
//! Both are pure functions of their inputs plus an explicit `now`. Inputs are
//! put in canonical order first (see [`super::canonical`]), so element order
//! never changes the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::buckets::{bucketize, count_by_day};
use super::calendar::project_month;
use super::canonical::{canonical_assets, canonical_collections, canonical_events};
use super::collection_stats::roll_up;
use super::growth::summarize;
use super::scope::resolve_scope;
use crate::api::{ActivityStats, CalendarProjection, OnchainCounts};
use crate::config::EngineConfig;
use crate::models::{CollectionRef, DisplayScopeConfig, EventDef, OwnedAsset, YearMonth};

/// Fully resolved collaborator data for one wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    #[serde(default)]
    pub assets: Vec<OwnedAsset>,
    #[serde(default)]
    pub collections: Vec<CollectionRef>,
    #[serde(default)]
    pub events: Vec<EventDef>,
    #[serde(default)]
    pub policy: DisplayScopeConfig,
    #[serde(default)]
    pub onchain_counts: OnchainCounts,
}

/// Stateless engine carrying window and date-parsing configuration.
#[derive(Debug, Clone, Default)]
pub struct ActivityEngine {
    config: EngineConfig,
}

impl ActivityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the full analytics view for `snapshot` as of `now`.
    pub fn activity_stats(&self, snapshot: &EngineSnapshot, now: DateTime<Utc>) -> ActivityStats {
        let assets = canonical_assets(&snapshot.assets);
        let collections = canonical_collections(&snapshot.collections);
        let events = canonical_events(&snapshot.events);
        let dates = &self.config.dates;

        let resolution = resolve_scope(&assets, &collections, &events, &snapshot.policy, dates);
        let in_scope_count = resolution.in_scope_count();

        let dated: Vec<DateTime<Utc>> = resolution
            .in_scope()
            .filter_map(|entry| {
                entry
                    .binding
                    .map(|b| b.occurred_at)
                    .or_else(|| dates.parse(entry.asset.raw_event_date()))
            })
            .collect();
        let undated_in_scope = in_scope_count - dated.len();
        if undated_in_scope > 0 {
            log::debug!(
                "{} in-scope assets have no usable event date and are left out of every series",
                undated_in_scope
            );
        }

        let series = bucketize(&count_by_day(dated), now, &self.config.buckets);
        let daily_trend = summarize(&series.daily);
        let weekly_trend = summarize(&series.weekly);
        let monthly_trend = summarize(&series.monthly);
        let rollup = roll_up(&collections, &resolution, &snapshot.onchain_counts);

        ActivityStats {
            generated_at: now,
            streak_weeks: weekly_trend.streak,
            daily: series.daily,
            weekly: series.weekly,
            monthly: series.monthly,
            daily_trend,
            weekly_trend,
            monthly_trend,
            collections: rollup.stats,
            most_active_collection: rollup.most_active,
            owned_count: assets.len(),
            in_scope_count,
            undated_in_scope,
            custody_excluded: resolution.custody_excluded,
        }
    }

    /// Calendar for `month` over the snapshot's in-scope assets.
    pub fn calendar_projection(
        &self,
        snapshot: &EngineSnapshot,
        month: YearMonth,
        now: DateTime<Utc>,
    ) -> CalendarProjection {
        let assets = canonical_assets(&snapshot.assets);
        let collections = canonical_collections(&snapshot.collections);
        let events = canonical_events(&snapshot.events);

        let resolution = resolve_scope(
            &assets,
            &collections,
            &events,
            &snapshot.policy,
            &self.config.dates,
        );
        let in_scope: Vec<OwnedAsset> = resolution
            .in_scope_assets()
            .into_iter()
            .cloned()
            .collect();

        project_month(&in_scope, &events, month, now, &self.config.dates)
    }

    /// Calendar for `month` over assets the caller already scoped.
    pub fn calendar_for_assets(
        &self,
        assets: &[OwnedAsset],
        events: &[EventDef],
        month: YearMonth,
        now: DateTime<Utc>,
    ) -> CalendarProjection {
        project_month(assets, events, month, now, &self.config.dates)
    }
}

/// Activity statistics with the default configuration.
pub fn compute_activity_stats(
    assets: &[OwnedAsset],
    collections: &[CollectionRef],
    events: &[EventDef],
    policy: &DisplayScopeConfig,
    onchain_counts: &OnchainCounts,
    now: DateTime<Utc>,
) -> ActivityStats {
    let snapshot = EngineSnapshot {
        assets: assets.to_vec(),
        collections: collections.to_vec(),
        events: events.to_vec(),
        policy: policy.clone(),
        onchain_counts: onchain_counts.clone(),
    };
    ActivityEngine::default().activity_stats(&snapshot, now)
}

/// Calendar projection with the default configuration.
///
/// `assets` are taken as already in scope.
pub fn compute_calendar_projection(
    assets: &[OwnedAsset],
    events: &[EventDef],
    target_month: YearMonth,
    now: DateTime<Utc>,
) -> CalendarProjection {
    ActivityEngine::default().calendar_for_assets(assets, events, target_month, now)
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod activity_tests;
