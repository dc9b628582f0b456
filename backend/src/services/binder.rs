//! Event binding by display name and validated event date.

use chrono::{DateTime, Utc};

use crate::models::{DatePolicy, EventDef, OwnedAsset};

/// Participation record linking an asset to a catalog event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBinding<'a> {
    pub event: &'a EventDef,
    /// Parsed from the asset's own `event_date`, not from the catalog.
    pub occurred_at: DateTime<Utc>,
}

/// Bind `asset` to the first event whose name equals its display name.
///
/// Both conditions are required: an exact, case-sensitive name match and a
/// usable `event_date` under `dates`. The type signature is not consulted.
pub fn bind_event<'a>(
    asset: &OwnedAsset,
    events: &'a [EventDef],
    dates: &DatePolicy,
) -> Option<EventBinding<'a>> {
    let name = asset.display_name()?;
    let event = events.iter().find(|event| event.name == name)?;
    let occurred_at = dates.parse(asset.raw_event_date())?;
    Some(EventBinding { event, occurred_at })
}
