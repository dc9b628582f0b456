//! # MintScope Backend
//!
//! Ownership reconciliation and engagement analytics for NFT portals.
//!
//! Given one wallet's ownership snapshot, the collection catalog, the event
//! catalog and an administrator display policy, the engine decides which
//! assets count toward engagement metrics, attributes each to the event it
//! commemorates, and derives daily/weekly/monthly series, growth trends,
//! per-collection stats and a month calendar.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain inputs (assets, collections, events, display policy) and UTC date helpers
//! - [`api`]: Output DTOs handed to presentation layers
//! - [`services`]: The pure engine (matching, binding, scope, buckets, growth, calendar)
//! - [`db`]: Collaborator trait, in-memory repository and the snapshot loader
//! - [`parsing`]: Normalisation of loosely-typed chain object listings
//! - [`config`]: TOML engine configuration
//!
//! ## Determinism
//!
//! Every engine entry point takes `now` explicitly and puts its inputs in a
//! total order first (see [`services::canonical`]), so the same records in any
//! order always produce identical output.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod parsing;
pub mod services;

pub use config::{ConfigError, EngineConfig};
pub use services::{
    compute_activity_stats, compute_calendar_projection, ActivityEngine, EngineSnapshot,
};
