//! High-level snapshot service layer.
//!
//! These functions work with any [`SnapshotRepository`] and turn a set of
//! independent, individually fallible fetches into one fully resolved
//! [`EngineSnapshot`]. A failed fetch never aborts the load: it is logged and
//! replaced by its safe default, so the engine always runs and its metrics
//! degrade to zero or empty instead.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Presentation (dashboard, calendar view, CLI)           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Concurrent fetch orchestration                       │
//! │  - Failure degradation                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  SnapshotRepository (repository/) - Abstract Interface  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Chain / catalog  │     │ Local Repository        │
//! │ clients (extern) │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use mintscope::db::{services, repositories::LocalRepository};
//! use mintscope::services::ActivityEngine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let repo = LocalRepository::new();
//!     let snapshot = services::load_snapshot(&repo, "0xwallet").await;
//!     let stats = ActivityEngine::default().activity_stats(&snapshot, chrono::Utc::now());
//!     println!("{} assets in scope", stats.in_scope_count);
//! }
//! ```

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, info, warn};

use super::repository::{RepositoryResult, SnapshotRepository};
use crate::api::{ActivityStats, CalendarProjection, OnchainCounts};
use crate::models::YearMonth;
use crate::services::{ActivityEngine, EngineSnapshot};

// ==================== Health & Connection ====================

/// Check if the backing source is reachable.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check<R: SnapshotRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Snapshot Loading ====================

/// Load everything the engine needs for `address`.
///
/// Every asset of the wallet is fetched (empty filter) so that raw custom
/// types configured in the display policy remain admissible.
pub async fn load_snapshot<R: SnapshotRepository + ?Sized>(
    repo: &R,
    address: &str,
) -> EngineSnapshot {
    load_snapshot_filtered(repo, address, &[]).await
}

/// Load a snapshot, restricting the wallet fetch to `collection_filter`.
///
/// Catalog, events and policy are fetched concurrently, then the wallet,
/// then one on-chain count per collection in parallel.
pub async fn load_snapshot_filtered<R: SnapshotRepository + ?Sized>(
    repo: &R,
    address: &str,
    collection_filter: &[String],
) -> EngineSnapshot {
    let (collections, events, policy) = tokio::join!(
        repo.fetch_collections(),
        repo.fetch_events(),
        repo.fetch_display_scope_config(),
    );
    let collections = or_default(collections, "fetch_collections");
    let events = or_default(events, "fetch_events");
    let policy = or_default(policy, "fetch_display_scope_config");

    let assets = or_default(
        repo.fetch_owned_assets(address, collection_filter).await,
        "fetch_owned_assets",
    );

    let counts = join_all(collections.iter().map(|collection| async move {
        let count = repo.fetch_onchain_count(&collection.id).await;
        (collection.id.clone(), count)
    }))
    .await;

    let onchain_counts: OnchainCounts = counts
        .into_iter()
        .map(|(id, count)| {
            let count = count.unwrap_or_else(|e| {
                warn!("fetch_onchain_count failed for {}, using 0: {}", id, e);
                0
            });
            (id, count)
        })
        .collect();

    info!(
        "Loaded snapshot for {}: {} assets, {} collections, {} events",
        address,
        assets.len(),
        collections.len(),
        events.len()
    );

    EngineSnapshot {
        assets,
        collections,
        events,
        policy,
        onchain_counts,
    }
}

// ==================== Engine Shortcuts ====================

/// Load a snapshot for `address` and compute its activity statistics.
pub async fn load_activity_stats<R: SnapshotRepository + ?Sized>(
    repo: &R,
    engine: &ActivityEngine,
    address: &str,
    now: DateTime<Utc>,
) -> ActivityStats {
    let snapshot = load_snapshot(repo, address).await;
    engine.activity_stats(&snapshot, now)
}

/// Load a snapshot for `address` and project its calendar for `month`.
pub async fn load_calendar_projection<R: SnapshotRepository + ?Sized>(
    repo: &R,
    engine: &ActivityEngine,
    address: &str,
    month: YearMonth,
    now: DateTime<Utc>,
) -> CalendarProjection {
    let snapshot = load_snapshot(repo, address).await;
    debug!("Projecting calendar {} for {}", month, address);
    engine.calendar_projection(&snapshot, month, now)
}

fn or_default<T: Default>(result: RepositoryResult<T>, operation: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} failed, continuing with defaults: {}", operation, e);
        T::default()
    })
}
