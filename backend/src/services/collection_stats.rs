use crate::api::{CollectionStats, OnchainCounts};
use crate::models::{CollectionId, CollectionRef};

use super::scope::ScopeResolution;

/// Per-collection stats plus the collection with the most holdings.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRollup {
    pub stats: Vec<CollectionStats>,
    pub most_active: Option<CollectionId>,
}

/// Roll up holdings per collection, in `collections` order.
///
/// `total_mints` counts in-scope assets of the collection that are bound to
/// an event; `owned_count` counts every matched asset whether in scope or not.
pub fn roll_up(
    collections: &[CollectionRef],
    resolution: &ScopeResolution<'_>,
    onchain_counts: &OnchainCounts,
) -> CollectionRollup {
    let stats: Vec<CollectionStats> = collections
        .iter()
        .map(|collection| {
            let matched = resolution
                .entries
                .iter()
                .filter(|entry| entry.is_matched_to(collection));

            let (owned_count, total_mints) = matched.fold((0, 0), |(owned, minted), entry| {
                let registered = entry.is_in_scope() && entry.binding.is_some();
                (owned + 1, minted + usize::from(registered))
            });

            CollectionStats {
                collection_id: collection.id.clone(),
                name: collection.name.clone(),
                total_mints,
                owned_count,
                onchain_count: onchain_counts.get(&collection.id).copied().unwrap_or(0),
                trend_percent: total_mints as f64 / owned_count.max(1) as f64 * 100.0,
            }
        })
        .collect();

    let most_active = stats
        .iter()
        .filter(|s| s.owned_count > 0)
        .fold(None::<&CollectionStats>, |best, s| match best {
            Some(current) if current.owned_count >= s.owned_count => Some(current),
            _ => Some(s),
        })
        .map(|s| s.collection_id.clone());

    CollectionRollup { stats, most_active }
}
