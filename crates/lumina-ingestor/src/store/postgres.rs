use deadpool_diesel::postgres::Pool;
use lumina_db::models::{
    Chain, CmcCryptocurrency, DexInfo, FeeInfo, NewChain, NewCmcCryptocurrency, NewProtocol,
    NewStablecoin, NewYieldPool, OverviewKind, OverviewSnapshot, PerpInfo, Protocol, Stablecoin,
    YieldPool,
};
use lumina_db::{DatabaseError, LuminaPool};

use super::SnapshotStore;

/// Store backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for PgStore {
    async fn save_chains(&self, rows: Vec<NewChain>) -> Result<usize, DatabaseError> {
        self.pool
            .interact_with_context("upsert chains".into(), move |conn| {
                for row in &rows {
                    Chain::upsert_by_name(row, conn)?;
                }
                Ok::<_, diesel::result::Error>(rows.len())
            })
            .await
    }

    async fn save_protocols(&self, rows: Vec<NewProtocol>) -> Result<usize, DatabaseError> {
        self.pool
            .interact_with_context("upsert protocols".into(), move |conn| {
                for row in &rows {
                    Protocol::upsert_by_protocol_id(row, conn)?;
                }
                Ok::<_, diesel::result::Error>(rows.len())
            })
            .await
    }

    async fn save_stablecoins(&self, rows: Vec<NewStablecoin>) -> Result<usize, DatabaseError> {
        self.pool
            .interact_with_context("upsert stablecoins".into(), move |conn| {
                for row in &rows {
                    Stablecoin::upsert_by_symbol(row, conn)?;
                }
                Ok::<_, diesel::result::Error>(rows.len())
            })
            .await
    }

    async fn save_yield_pools(&self, rows: Vec<NewYieldPool>) -> Result<usize, DatabaseError> {
        self.pool
            .interact_with_context("upsert yield pools".into(), move |conn| {
                for row in &rows {
                    YieldPool::upsert_by_pool(row, conn)?;
                }
                Ok::<_, diesel::result::Error>(rows.len())
            })
            .await
    }

    async fn save_overview(
        &self,
        kind: OverviewKind,
        snapshot: OverviewSnapshot,
    ) -> Result<usize, DatabaseError> {
        let operation = format!(
            "save {kind} overview for {}",
            snapshot.chain.as_deref().unwrap_or("all chains")
        );
        self.pool
            .interact_with_context(operation, move |conn| {
                let saved = match kind {
                    OverviewKind::Dex => DexInfo::save_snapshot(&snapshot, conn)?.1,
                    OverviewKind::Fee => FeeInfo::save_snapshot(&snapshot, conn)?.1,
                    OverviewKind::Perp => PerpInfo::save_snapshot(&snapshot, conn)?.1,
                };
                Ok::<_, DatabaseError>(saved)
            })
            .await
    }

    async fn save_cmc_listings(
        &self,
        rows: Vec<NewCmcCryptocurrency>,
    ) -> Result<usize, DatabaseError> {
        self.pool
            .interact_with_context("upsert cmc cryptocurrencies".into(), move |conn| {
                for row in &rows {
                    CmcCryptocurrency::upsert(row, conn)?;
                }
                Ok::<_, diesel::result::Error>(rows.len())
            })
            .await
    }

    async fn top_chains(&self, limit: usize) -> Result<Vec<String>, DatabaseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.pool
            .interact_with_context("fetch top chains by tvl".into(), move |conn| {
                Chain::find_top_by_tvl(limit, conn)
                    .map(|chains| chains.into_iter().map(|chain| chain.name).collect())
            })
            .await
    }
}
