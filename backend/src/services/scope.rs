//! Display scope resolution.
//!
//! Two deliberately separate contracts:
//! - **Configured**: any of the three policy sets is non-empty; an asset is
//!   admitted by its matched collection, its bound event, or its raw type.
//! - **Default**: nothing is configured; every event-bound asset is admitted.
//!
//! The custody filter applies after admission in both modes.

use serde::{Deserialize, Serialize};

use super::binder::{bind_event, EventBinding};
use super::matcher::{match_collection, CollectionMatch};
use crate::models::{CollectionRef, DatePolicy, DisplayScopeConfig, EventDef, OwnedAsset};

/// Which contract produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    Configured,
    Default,
}

/// Why an asset is in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeReason {
    EnabledCollection,
    EnabledEvent,
    CustomAssetType,
    /// Default mode: bound to any event.
    EventParticipation,
}

/// Per-asset evaluation, kept so later stages never re-match or re-bind.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAsset<'a> {
    pub asset: &'a OwnedAsset,
    pub matched: Option<CollectionMatch<'a>>,
    pub binding: Option<EventBinding<'a>>,
    /// `None` when out of scope.
    pub reason: Option<ScopeReason>,
}

impl ResolvedAsset<'_> {
    pub fn is_in_scope(&self) -> bool {
        self.reason.is_some()
    }

    pub fn is_matched_to(&self, collection: &CollectionRef) -> bool {
        self.matched
            .is_some_and(|m| m.collection.id == collection.id)
    }
}

#[derive(Debug, Clone)]
pub struct ScopeResolution<'a> {
    pub mode: ScopeMode,
    /// One entry per input asset, in input order.
    pub entries: Vec<ResolvedAsset<'a>>,
    /// Assets that were admitted but dropped by the custody filter.
    pub custody_excluded: usize,
}

impl<'a> ScopeResolution<'a> {
    pub fn in_scope(&self) -> impl Iterator<Item = &ResolvedAsset<'a>> + '_ {
        self.entries.iter().filter(|entry| entry.is_in_scope())
    }

    pub fn in_scope_count(&self) -> usize {
        self.in_scope().count()
    }

    pub fn in_scope_assets(&self) -> Vec<&'a OwnedAsset> {
        self.in_scope().map(|entry| entry.asset).collect()
    }
}

/// Compute the in-scope subset of `assets` under `policy`.
pub fn resolve_scope<'a>(
    assets: &'a [OwnedAsset],
    collections: &'a [CollectionRef],
    events: &'a [EventDef],
    policy: &DisplayScopeConfig,
    dates: &DatePolicy,
) -> ScopeResolution<'a> {
    let mode = if policy.is_policy_present() {
        ScopeMode::Configured
    } else {
        ScopeMode::Default
    };

    let mut custody_excluded = 0;
    let entries = assets
        .iter()
        .map(|asset| {
            let matched = match_collection(&asset.type_signature, collections);
            let binding = bind_event(asset, events, dates);

            let admitted = match mode {
                ScopeMode::Configured => configured_reason(asset, matched, binding, policy),
                ScopeMode::Default => default_reason(binding),
            };

            let reason = match admitted {
                Some(_) if !policy.include_kiosk && asset.is_custody_delegated() => {
                    custody_excluded += 1;
                    None
                }
                other => other,
            };

            ResolvedAsset {
                asset,
                matched,
                binding,
                reason,
            }
        })
        .collect::<Vec<_>>();

    let resolution = ScopeResolution {
        mode,
        entries,
        custody_excluded,
    };
    log::debug!(
        "Resolved scope ({:?}): {} of {} assets in scope, {} dropped by custody filter",
        resolution.mode,
        resolution.in_scope_count(),
        assets.len(),
        custody_excluded
    );
    resolution
}

fn configured_reason(
    asset: &OwnedAsset,
    matched: Option<CollectionMatch<'_>>,
    binding: Option<EventBinding<'_>>,
    policy: &DisplayScopeConfig,
) -> Option<ScopeReason> {
    if matched.is_some_and(|m| policy.enabled_collections.contains(&m.collection.id)) {
        return Some(ScopeReason::EnabledCollection);
    }
    if binding.is_some_and(|b| policy.enabled_events.contains(&b.event.id)) {
        return Some(ScopeReason::EnabledEvent);
    }
    if policy.custom_asset_types.contains(&asset.type_signature) {
        return Some(ScopeReason::CustomAssetType);
    }
    None
}

fn default_reason(binding: Option<EventBinding<'_>>) -> Option<ScopeReason> {
    binding.map(|_| ScopeReason::EventParticipation)
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod scope_tests;
