//! In-memory store for exercising the ingestors without a database.

use std::collections::HashMap;

use lumina_db::DatabaseError;
use lumina_db::models::{
    CmcLookupKey, NewChain, NewCmcCryptocurrency, NewProtocol, NewStablecoin, NewYieldPool,
    OverviewInfoRecord, OverviewKind, OverviewProtocolRecord, OverviewSnapshot,
};
use tokio::sync::RwLock;

use super::SnapshotStore;

/// Protocol row of an overview together with the info row (chain) it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOverviewProtocol {
    pub chain: Option<String>,
    pub record: OverviewProtocolRecord,
}

#[derive(Debug, Clone, Default)]
struct OverviewTables {
    infos: HashMap<(OverviewKind, Option<String>), OverviewInfoRecord>,
    protocols: HashMap<(OverviewKind, String), StoredOverviewProtocol>,
}

/// Store keeping the latest row per natural key, with failure toggles.
#[derive(Default)]
pub struct MemoryStore {
    chains: RwLock<HashMap<String, NewChain>>,
    protocols: RwLock<HashMap<String, NewProtocol>>,
    stablecoins: RwLock<HashMap<String, NewStablecoin>>,
    yield_pools: RwLock<HashMap<String, NewYieldPool>>,
    overviews: RwLock<OverviewTables>,
    cmc: RwLock<Vec<NewCmcCryptocurrency>>,
    fail_on_save_chains: RwLock<bool>,
    fail_on_top_chains: RwLock<bool>,
    fail_after_overview_info: RwLock<bool>,
}

fn injected(operation: &str) -> DatabaseError {
    DatabaseError::query_error(operation, "injected failure")
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_save_chains(&self, fail: bool) {
        *self.fail_on_save_chains.write().await = fail;
    }

    pub async fn set_fail_on_top_chains(&self, fail: bool) {
        *self.fail_on_top_chains.write().await = fail;
    }

    /// Makes overview writes fail after the info row is staged and before any
    /// protocol row is written.
    pub async fn set_fail_after_overview_info(&self, fail: bool) {
        *self.fail_after_overview_info.write().await = fail;
    }

    pub async fn chain(&self, name: &str) -> Option<NewChain> {
        self.chains.read().await.get(name).cloned()
    }

    pub async fn chain_count(&self) -> usize {
        self.chains.read().await.len()
    }

    pub async fn protocol(&self, protocol_id: &str) -> Option<NewProtocol> {
        self.protocols.read().await.get(protocol_id).cloned()
    }

    pub async fn stablecoin_count(&self) -> usize {
        self.stablecoins.read().await.len()
    }

    pub async fn yield_pool_count(&self) -> usize {
        self.yield_pools.read().await.len()
    }

    pub async fn overview_info(
        &self,
        kind: OverviewKind,
        chain: Option<&str>,
    ) -> Option<OverviewInfoRecord> {
        self.overviews
            .read()
            .await
            .infos
            .get(&(kind, chain.map(str::to_string)))
            .cloned()
    }

    pub async fn overview_protocol(
        &self,
        kind: OverviewKind,
        defillama_id: &str,
    ) -> Option<StoredOverviewProtocol> {
        self.overviews
            .read()
            .await
            .protocols
            .get(&(kind, defillama_id.to_string()))
            .cloned()
    }

    pub async fn overview_protocol_count(&self, kind: OverviewKind) -> usize {
        self.overviews
            .read()
            .await
            .protocols
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub async fn cmc_listings(&self) -> Vec<NewCmcCryptocurrency> {
        self.cmc.read().await.clone()
    }
}

fn same_listing(stored: &NewCmcCryptocurrency, key: &CmcLookupKey<'_>) -> bool {
    match key {
        CmcLookupKey::CmcId(id) => stored.cmc_id == Some(*id),
        CmcLookupKey::SymbolSlug { symbol, slug } => {
            stored.symbol.as_deref() == Some(*symbol) && stored.slug.as_deref() == Some(*slug)
        }
        CmcLookupKey::None => false,
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn save_chains(&self, rows: Vec<NewChain>) -> Result<usize, DatabaseError> {
        if *self.fail_on_save_chains.read().await {
            return Err(injected("upsert chains"));
        }
        let mut chains = self.chains.write().await;
        let saved = rows.len();
        for row in rows {
            chains.insert(row.name.clone(), row);
        }
        Ok(saved)
    }

    async fn save_protocols(&self, rows: Vec<NewProtocol>) -> Result<usize, DatabaseError> {
        let mut protocols = self.protocols.write().await;
        let saved = rows.len();
        for row in rows {
            protocols.insert(row.protocol_id.clone(), row);
        }
        Ok(saved)
    }

    async fn save_stablecoins(&self, rows: Vec<NewStablecoin>) -> Result<usize, DatabaseError> {
        let mut stablecoins = self.stablecoins.write().await;
        let saved = rows.len();
        for row in rows {
            stablecoins.insert(row.symbol.clone(), row);
        }
        Ok(saved)
    }

    async fn save_yield_pools(&self, rows: Vec<NewYieldPool>) -> Result<usize, DatabaseError> {
        let mut pools = self.yield_pools.write().await;
        let saved = rows.len();
        for row in rows {
            pools.insert(row.pool.clone(), row);
        }
        Ok(saved)
    }

    async fn save_overview(
        &self,
        kind: OverviewKind,
        snapshot: OverviewSnapshot,
    ) -> Result<usize, DatabaseError> {
        if let Some(chain) = snapshot.chain.as_deref() {
            let known = self.chains.read().await.contains_key(chain);
            if !known {
                return Err(DatabaseError::not_found(format!("resolve chain '{chain}'")));
            }
        }

        let mut overviews = self.overviews.write().await;
        // Staged copy, swapped in once every protocol row is written.
        let mut staged = overviews.clone();
        staged
            .infos
            .insert((kind, snapshot.chain.clone()), snapshot.info);

        if *self.fail_after_overview_info.read().await {
            return Err(injected(&format!("save {kind} overview protocols")));
        }

        let saved = snapshot.protocols.len();
        for record in snapshot.protocols {
            staged.protocols.insert(
                (kind, record.defillama_id.clone()),
                StoredOverviewProtocol {
                    chain: snapshot.chain.clone(),
                    record,
                },
            );
        }
        *overviews = staged;
        Ok(saved)
    }

    async fn save_cmc_listings(
        &self,
        rows: Vec<NewCmcCryptocurrency>,
    ) -> Result<usize, DatabaseError> {
        let mut listings = self.cmc.write().await;
        let saved = rows.len();
        for row in rows {
            let position = {
                let key = row.lookup_key();
                listings.iter().position(|stored| same_listing(stored, &key))
            };
            match position {
                Some(position) => listings[position] = row,
                None => listings.push(row),
            }
        }
        Ok(saved)
    }

    async fn top_chains(&self, limit: usize) -> Result<Vec<String>, DatabaseError> {
        if *self.fail_on_top_chains.read().await {
            return Err(injected("fetch top chains by tvl"));
        }
        let chains = self.chains.read().await;
        let mut ranked: Vec<&NewChain> = chains.values().collect();
        ranked.sort_by(|a, b| b.tvl.cmp(&a.tvl).then_with(|| a.name.cmp(&b.name)));
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|chain| chain.name.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn chain(name: &str, tvl: rust_decimal::Decimal) -> NewChain {
        NewChain {
            name: name.into(),
            gecko_id: None,
            tvl,
            token_symbol: None,
            cmc_id: None,
            chain_id: None,
        }
    }

    fn snapshot(chain: Option<&str>, ids: &[&str]) -> OverviewSnapshot {
        OverviewSnapshot {
            chain: chain.map(str::to_string),
            info: OverviewInfoRecord {
                total_24h: Some(dec!(5)),
                ..Default::default()
            },
            protocols: ids
                .iter()
                .map(|id| OverviewProtocolRecord {
                    defillama_id: (*id).to_string(),
                    name: (*id).to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_last_write_wins_per_natural_key() {
        let store = MemoryStore::new();
        let first = NewChain {
            token_symbol: Some("ETH".into()),
            ..chain("Ethereum", dec!(1))
        };
        let second = chain("Ethereum", dec!(2));
        store.save_chains(vec![first]).await.unwrap();
        store.save_chains(vec![second.clone()]).await.unwrap();

        assert_eq!(store.chain_count().await, 1);
        assert_eq!(store.chain("Ethereum").await, Some(second));
    }

    #[tokio::test]
    async fn test_top_chains_orders_by_tvl() {
        let store = MemoryStore::new();
        store
            .save_chains(vec![chain("Base", dec!(100)), chain("Eth", dec!(500)), chain("Zk", dec!(1))])
            .await
            .unwrap();
        assert_eq!(store.top_chains(2).await.unwrap(), vec!["Eth", "Base"]);
    }

    #[tokio::test]
    async fn test_overview_requires_known_chain() {
        let store = MemoryStore::new();
        let err = store
            .save_overview(OverviewKind::Dex, snapshot(Some("Ethereum"), &["1"]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.overview_info(OverviewKind::Dex, Some("Ethereum")).await.is_none());

        let saved = store
            .save_overview(OverviewKind::Perp, snapshot(None, &["1", "2"]))
            .await
            .unwrap();
        assert_eq!(saved, 2);
        assert!(store.overview_info(OverviewKind::Perp, None).await.is_some());
    }

    #[tokio::test]
    async fn test_failure_mid_overview_commits_nothing() {
        let store = MemoryStore::new();
        store.save_chains(vec![chain("Ethereum", dec!(1))]).await.unwrap();
        store.set_fail_after_overview_info(true).await;

        assert!(
            store
                .save_overview(OverviewKind::Dex, snapshot(Some("Ethereum"), &["1"]))
                .await
                .is_err()
        );
        assert!(store.overview_info(OverviewKind::Dex, Some("Ethereum")).await.is_none());
        assert_eq!(store.overview_protocol_count(OverviewKind::Dex).await, 0);
    }

    #[tokio::test]
    async fn test_overview_protocol_moves_to_latest_info() {
        let store = MemoryStore::new();
        store
            .save_chains(vec![chain("Ethereum", dec!(2)), chain("Base", dec!(1))])
            .await
            .unwrap();
        store
            .save_overview(OverviewKind::Fee, snapshot(Some("Ethereum"), &["7"]))
            .await
            .unwrap();
        store
            .save_overview(OverviewKind::Fee, snapshot(Some("Base"), &["7"]))
            .await
            .unwrap();

        let stored = store.overview_protocol(OverviewKind::Fee, "7").await.unwrap();
        assert_eq!(stored.chain.as_deref(), Some("Base"));
        assert_eq!(store.overview_protocol_count(OverviewKind::Fee).await, 1);
        assert_eq!(store.overview_protocol_count(OverviewKind::Dex).await, 0);
    }
}
