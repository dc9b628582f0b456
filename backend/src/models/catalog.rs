use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(CollectionId);
define_id_type!(EventId);

/// Catalog entry for an asset family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: CollectionId,
    pub name: String,
    /// Preferred matching key, a full `package::module::Type` path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_type_path: Option<String>,
    /// Legacy matching key; may be a bare package address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
}

impl CollectionRef {
    pub fn new(id: impl Into<CollectionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            canonical_type_path: None,
            package_id: None,
        }
    }

    pub fn with_canonical_type_path(mut self, path: impl Into<String>) -> Self {
        self.canonical_type_path = Some(path.into());
        self
    }

    pub fn with_package_id(mut self, package_id: impl Into<String>) -> Self {
        self.package_id = Some(package_id.into());
        self
    }
}

/// A scheduled or past minting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDef {
    pub id: EventId,
    /// Binding key; assumed unique across the catalog.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    /// Collection id or package id the event mints into.
    pub collection_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minted_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cap: Option<u64>,
}

impl EventDef {
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        collection_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            start_at: None,
            end_at: None,
            event_date: None,
            collection_ref: collection_ref.into(),
            minted_count: None,
            total_cap: None,
        }
    }

    pub fn with_start_at(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn with_event_date(mut self, event_date: DateTime<Utc>) -> Self {
        self.event_date = Some(event_date);
        self
    }

    /// `event_date`, falling back to `start_at`.
    pub fn date_of_record(&self) -> Option<DateTime<Utc>> {
        self.event_date.or(self.start_at)
    }

    /// Whether the event has not started yet at `now`.
    ///
    /// Uses `start_at` when present, otherwise the date of record. Events with
    /// neither are never upcoming.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_at
            .or(self.event_date)
            .is_some_and(|start| start >= now)
    }

    /// Remaining mint capacity, when a cap is set.
    pub fn remaining_capacity(&self) -> Option<u64> {
        self.total_cap
            .map(|cap| cap.saturating_sub(self.minted_count.unwrap_or(0)))
    }
}
