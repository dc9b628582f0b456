//! Month calendar of past participation and upcoming events.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

use super::binder::bind_event;
use super::canonical::{canonical_assets, canonical_events};
use crate::api::{CalendarDay, CalendarParticipation, CalendarProjection, UpcomingEvent};
use crate::models::{day_key, DatePolicy, EventDef, OwnedAsset, YearMonth};

/// Project `assets` (already in scope) and `events` onto the days of `month`.
///
/// Inputs are put in canonical order first, so duplicate object ids collapse
/// to one record and an id lands on at most one day. Participation entries
/// come from each asset's own bound event date. Upcoming entries are events whose date
/// of record falls in the month and which have not started at `now`. Both
/// lists are sorted by id.
pub fn project_month(
    assets: &[OwnedAsset],
    events: &[EventDef],
    month: YearMonth,
    now: DateTime<Utc>,
    dates: &DatePolicy,
) -> CalendarProjection {
    let assets = canonical_assets(assets);
    let events = canonical_events(events);
    let mut participations: BTreeMap<NaiveDate, Vec<CalendarParticipation>> = BTreeMap::new();

    for asset in &assets {
        let Some(binding) = bind_event(asset, &events, dates) else {
            continue;
        };
        let day = binding.occurred_at.date_naive();
        if !month.contains(day) {
            continue;
        }
        participations
            .entry(day)
            .or_default()
            .push(CalendarParticipation {
                object_id: asset.object_id.clone(),
                event_id: binding.event.id.clone(),
                event_name: binding.event.name.clone(),
                occurred_at: binding.occurred_at,
                image_ref: asset.display.as_ref().and_then(|d| d.image_ref.clone()),
            });
    }

    let mut upcoming: BTreeMap<NaiveDate, Vec<UpcomingEvent>> = BTreeMap::new();
    let mut seen_events = BTreeSet::new();
    for event in &events {
        let Some(scheduled_at) = event.date_of_record() else {
            continue;
        };
        let day = scheduled_at.date_naive();
        if !month.contains(day) || !event.is_upcoming(now) || !seen_events.insert(&event.id) {
            continue;
        }
        upcoming.entry(day).or_default().push(UpcomingEvent {
            event_id: event.id.clone(),
            name: event.name.clone(),
            scheduled_at,
            remaining_capacity: event.remaining_capacity(),
        });
    }
    for list in upcoming.values_mut() {
        list.sort_by(|a, b| a.event_id.cmp(&b.event_id));
    }

    let days = month
        .days()
        .map(|date| CalendarDay {
            date,
            key: day_key(date),
            participations: participations.remove(&date).unwrap_or_default(),
            upcoming: upcoming.remove(&date).unwrap_or_default(),
        })
        .collect();

    let projection = CalendarProjection {
        month,
        leading_blank_days: month
            .first_day()
            .map_or(0, |first| first.weekday().num_days_from_sunday()),
        days,
    };
    log::debug!(
        "Projected calendar for {}: {} participations, {} upcoming events",
        month,
        projection.participation_count(),
        projection.upcoming_count()
    );
    projection
}
