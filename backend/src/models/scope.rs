use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::{CollectionId, EventId};

/// Declarative visibility policy maintained by portal administrators.
///
/// With all three sets empty the policy is "absent" and scope falls back to
/// event participation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayScopeConfig {
    #[serde(default)]
    pub enabled_collections: BTreeSet<CollectionId>,
    #[serde(default)]
    pub enabled_events: BTreeSet<EventId>,
    /// Raw type signatures admitted regardless of catalog membership.
    #[serde(default)]
    pub custom_asset_types: BTreeSet<String>,
    /// Count kiosk-held assets.
    #[serde(default = "default_include_kiosk")]
    pub include_kiosk: bool,
}

fn default_include_kiosk() -> bool {
    true
}

impl Default for DisplayScopeConfig {
    fn default() -> Self {
        Self {
            enabled_collections: BTreeSet::new(),
            enabled_events: BTreeSet::new(),
            custom_asset_types: BTreeSet::new(),
            include_kiosk: default_include_kiosk(),
        }
    }
}

impl DisplayScopeConfig {
    /// True when any of the three admission sets is non-empty.
    pub fn is_policy_present(&self) -> bool {
        !self.enabled_collections.is_empty()
            || !self.enabled_events.is_empty()
            || !self.custom_asset_types.is_empty()
    }
}
