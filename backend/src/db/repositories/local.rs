//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`SnapshotRepository`]
//! suitable for unit testing and local development. Wallet holdings, the
//! catalog and the display policy live in memory behind a single lock, and
//! any fetch can be made to fail on demand to exercise degradation paths.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, SnapshotRepository};
use crate::models::{CollectionId, CollectionRef, DisplayScopeConfig, EventDef, OwnedAsset};

/// Fetch operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalOperation {
    OwnedAssets,
    Collections,
    Events,
    DisplayScopeConfig,
    OnchainCount,
}

impl LocalOperation {
    fn name(self) -> &'static str {
        match self {
            LocalOperation::OwnedAssets => "fetch_owned_assets",
            LocalOperation::Collections => "fetch_collections",
            LocalOperation::Events => "fetch_events",
            LocalOperation::DisplayScopeConfig => "fetch_display_scope_config",
            LocalOperation::OnchainCount => "fetch_onchain_count",
        }
    }
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use mintscope::db::repositories::LocalRepository;
/// use mintscope::models::{OwnedAsset, CollectionRef};
///
/// let repo = LocalRepository::new();
/// repo.add_asset("0xwallet", OwnedAsset::new("0x1", "0xabc::badge::Badge"));
/// repo.add_collection(CollectionRef::new("badges", "Badges").with_package_id("0xabc"));
/// assert_eq!(repo.asset_count("0xwallet"), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    holdings: HashMap<String, Vec<OwnedAsset>>,
    collections: Vec<CollectionRef>,
    events: Vec<EventDef>,
    policy: Option<DisplayScopeConfig>,
    onchain_counts: HashMap<CollectionId, u64>,

    // Injected failures
    failing: HashSet<LocalOperation>,

    // Connection health
    is_unhealthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Record `asset` as held by `address`, replacing any asset with the same id.
    pub fn add_asset(&self, address: &str, asset: OwnedAsset) {
        let mut data = self.data.write();
        let held = data.holdings.entry(address.to_string()).or_default();
        held.retain(|existing| existing.object_id != asset.object_id);
        held.push(asset);
    }

    /// Replace the full holdings of `address`.
    pub fn set_assets(&self, address: &str, assets: Vec<OwnedAsset>) {
        self.data.write().holdings.insert(address.to_string(), assets);
    }

    pub fn add_collection(&self, collection: CollectionRef) {
        self.data.write().collections.push(collection);
    }

    pub fn add_event(&self, event: EventDef) {
        self.data.write().events.push(event);
    }

    pub fn set_display_scope_config(&self, policy: DisplayScopeConfig) {
        self.data.write().policy = Some(policy);
    }

    pub fn set_onchain_count(&self, collection_id: impl Into<CollectionId>, count: u64) {
        self.data
            .write()
            .onchain_counts
            .insert(collection_id.into(), count);
    }

    /// Make every subsequent call of `operation` fail as an upstream outage.
    pub fn fail_on(&self, operation: LocalOperation) {
        self.data.write().failing.insert(operation);
    }

    /// Undo a previous [`fail_on`](Self::fail_on).
    pub fn recover(&self, operation: LocalOperation) {
        self.data.write().failing.remove(&operation);
    }

    /// Set the health status for testing outages.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_unhealthy = !healthy;
    }

    /// Clear all data from the repository, keeping injected failures.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let failing = std::mem::take(&mut data.failing);
        let is_unhealthy = data.is_unhealthy;
        *data = LocalData {
            failing,
            is_unhealthy,
            ..Default::default()
        };
    }

    /// Number of assets held by `address`.
    pub fn asset_count(&self, address: &str) -> usize {
        self.data
            .read()
            .holdings
            .get(address)
            .map_or(0, |held| held.len())
    }

    /// Helper to check health and injected failures for one operation.
    fn check(&self, operation: LocalOperation) -> RepositoryResult<()> {
        let data = self.data.read();
        if data.is_unhealthy {
            return Err(RepositoryError::unavailable(
                "Local repository is not healthy",
                ErrorContext::during(operation.name()),
            ));
        }
        if data.failing.contains(&operation) {
            return Err(RepositoryError::unavailable(
                "Injected failure",
                ErrorContext::during(operation.name()),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// An asset passes the filter when its type signature equals or contains any entry.
fn passes_filter(asset: &OwnedAsset, collection_filter: &[String]) -> bool {
    let mut keys = collection_filter.iter().filter(|key| !key.is_empty()).peekable();
    if keys.peek().is_none() {
        return true;
    }
    keys.any(|key| asset.type_signature.contains(key.as_str()))
}

#[async_trait]
impl SnapshotRepository for LocalRepository {
    async fn fetch_owned_assets(
        &self,
        address: &str,
        collection_filter: &[String],
    ) -> RepositoryResult<Vec<OwnedAsset>> {
        self.check(LocalOperation::OwnedAssets)?;
        let data = self.data.read();
        Ok(data
            .holdings
            .get(address)
            .map(|held| {
                held.iter()
                    .filter(|asset| passes_filter(asset, collection_filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn fetch_collections(&self) -> RepositoryResult<Vec<CollectionRef>> {
        self.check(LocalOperation::Collections)?;
        Ok(self.data.read().collections.clone())
    }

    async fn fetch_events(&self) -> RepositoryResult<Vec<EventDef>> {
        self.check(LocalOperation::Events)?;
        Ok(self.data.read().events.clone())
    }

    async fn fetch_display_scope_config(&self) -> RepositoryResult<DisplayScopeConfig> {
        self.check(LocalOperation::DisplayScopeConfig)?;
        Ok(self.data.read().policy.clone().unwrap_or_default())
    }

    async fn fetch_onchain_count(&self, collection_id: &CollectionId) -> RepositoryResult<u64> {
        self.check(LocalOperation::OnchainCount)?;
        self.data
            .read()
            .onchain_counts
            .get(collection_id)
            .copied()
            .ok_or_else(|| {
                RepositoryError::not_found(
                    "No on-chain count recorded",
                    ErrorContext::during(LocalOperation::OnchainCount.name())
                        .about("collection", collection_id),
                )
            })
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.data.read().is_unhealthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.add_asset("0xw", OwnedAsset::new("0x1", "0xabc::badge::Badge"));
        repo.add_asset("0xw", OwnedAsset::new("0x2", "0xdef::ticket::Ticket"));
        repo.add_collection(CollectionRef::new("badges", "Badges").with_package_id("0xabc"));
        repo.set_onchain_count("badges", 42);
        repo
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(repo.fetch_collections().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_filter_returns_everything() {
        let repo = seeded();
        let assets = repo.fetch_owned_assets("0xw", &[]).await.unwrap();
        assert_eq!(assets.len(), 2);

        let blank = repo.fetch_owned_assets("0xw", &[String::new()]).await.unwrap();
        assert_eq!(blank.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_package() {
        let repo = seeded();
        let assets = repo
            .fetch_owned_assets("0xw", &["0xabc".to_string()])
            .await
            .unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].object_id.as_str(), "0x1");
    }

    #[tokio::test]
    async fn test_unknown_address_is_empty() {
        let repo = seeded();
        assert!(repo.fetch_owned_assets("0xnobody", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_asset_replaces_same_id() {
        let repo = seeded();
        repo.add_asset("0xw", OwnedAsset::new("0x1", "0xabc::badge::Badge2"));
        assert_eq!(repo.asset_count("0xw"), 2);
    }

    #[tokio::test]
    async fn test_onchain_count_not_found() {
        let repo = seeded();
        assert_eq!(repo.fetch_onchain_count(&"badges".into()).await.unwrap(), 42);

        let err = repo.fetch_onchain_count(&"tickets".into()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(
            err.context().and_then(|ctx| ctx.subject.as_deref()),
            Some("collection tickets")
        );
    }

    #[tokio::test]
    async fn test_failure_injection_and_recovery() {
        let repo = seeded();
        repo.fail_on(LocalOperation::Collections);

        let err = repo.fetch_collections().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.operation(), Some("fetch_collections"));
        // other operations unaffected
        assert_eq!(repo.fetch_owned_assets("0xw", &[]).await.unwrap().len(), 2);

        repo.recover(LocalOperation::Collections);
        assert_eq!(repo.fetch_collections().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_policy_is_default() {
        let repo = LocalRepository::new();
        let policy = repo.fetch_display_scope_config().await.unwrap();
        assert_eq!(policy, DisplayScopeConfig::default());
    }

    #[test]
    fn test_clear_keeps_injected_failures() {
        let repo = seeded();
        repo.fail_on(LocalOperation::Events);
        repo.clear();
        assert_eq!(repo.asset_count("0xw"), 0);
        assert!(repo.data.read().failing.contains(&LocalOperation::Events));
    }
}
