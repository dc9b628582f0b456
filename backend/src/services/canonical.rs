//! Canonical ordering of engine inputs.
//!
//! Records are sorted by id, and records sharing an id are ordered by their
//! full serialized form. This makes the order total, so the surviving
//! duplicate and the first-match event never depend on how the caller
//! ordered its arrays.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{CollectionRef, EventDef, OwnedAsset};

fn content<T: Serialize>(record: &T) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

fn by_id_then_content<T: Serialize, K: Ord + ?Sized>(
    a: &T,
    b: &T,
    id: impl Fn(&T) -> &K,
) -> Ordering {
    id(a).cmp(id(b)).then_with(|| content(a).cmp(&content(b)))
}

/// Assets ordered by object id, one record per id.
///
/// Of several records sharing an id, the one with the smallest serialized
/// form is kept.
pub fn canonical_assets<'a, I>(assets: I) -> Vec<OwnedAsset>
where
    I: IntoIterator<Item = &'a OwnedAsset>,
{
    let mut ordered: Vec<OwnedAsset> = assets.into_iter().cloned().collect();
    ordered.sort_by(|a, b| by_id_then_content(a, b, |asset| &asset.object_id));
    ordered.dedup_by(|later, earlier| later.object_id == earlier.object_id);
    ordered
}

/// Events ordered by id; same-id events keep a content-based order.
pub fn canonical_events(events: &[EventDef]) -> Vec<EventDef> {
    let mut ordered = events.to_vec();
    ordered.sort_by(|a, b| by_id_then_content(a, b, |event| &event.id));
    ordered
}

/// Collections ordered by id; same-id collections keep a content-based order.
pub fn canonical_collections(collections: &[CollectionRef]) -> Vec<CollectionRef> {
    let mut ordered = collections.to_vec();
    ordered.sort_by(|a, b| by_id_then_content(a, b, |collection| &collection.id));
    ordered
}
