//! Collaborator trait for everything the engine consumes.
//!
//! Implementations wrap whatever actually holds the data (chain RPC, an
//! indexer, the admin catalog service). The engine itself never calls these;
//! the snapshot loader in [`crate::db::services`] does, before computing.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{CollectionId, CollectionRef, DisplayScopeConfig, EventDef, OwnedAsset};

/// Repository trait for ownership snapshots and catalog data.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so fetches can run concurrently.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Fetch assets currently held by `address`.
    ///
    /// # Arguments
    /// * `address` - Wallet address
    /// * `collection_filter` - Type signatures or package ids to restrict to;
    ///   an empty filter returns every asset
    async fn fetch_owned_assets(
        &self,
        address: &str,
        collection_filter: &[String],
    ) -> RepositoryResult<Vec<OwnedAsset>>;

    /// Fetch all catalog collections.
    async fn fetch_collections(&self) -> RepositoryResult<Vec<CollectionRef>>;

    /// Fetch all catalog events.
    async fn fetch_events(&self) -> RepositoryResult<Vec<EventDef>>;

    /// Fetch the display policy; an unconfigured deployment returns the default.
    async fn fetch_display_scope_config(&self) -> RepositoryResult<DisplayScopeConfig>;

    /// Fetch the global minted count for one collection.
    async fn fetch_onchain_count(&self, collection_id: &CollectionId) -> RepositoryResult<u64>;

    /// Check whether the backing source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
