//! Service layer for the reconciliation and analytics engine.
//!
//! Each stage is a pure function over borrowed inputs:
//! identity matching, event binding, scope resolution, bucketing,
//! growth/trend metrics, collection roll-up and calendar projection.
//! [`canonical`] fixes input order before any of them run.
//! [`activity`] wires them into the two public entry points.

pub mod activity;
pub mod binder;
pub mod buckets;
pub mod calendar;
pub mod canonical;
pub mod collection_stats;
pub mod growth;
pub mod matcher;
pub mod scope;

pub use activity::{
    compute_activity_stats, compute_calendar_projection, ActivityEngine, EngineSnapshot,
};
pub use binder::{bind_event, EventBinding};
pub use buckets::BucketWindows;
pub use matcher::{match_collection, CollectionMatch, MatchRule};
pub use scope::{resolve_scope, ScopeMode, ScopeReason, ScopeResolution};
