//! Persistence seam of the ingestors.
//!
//! Batches of plain rows go through a store as best-effort upserts: rows are
//! written one statement at a time and the first failing row aborts the rest of
//! its batch. Overview snapshots are the exception and are written atomically.

pub mod memory;
pub mod postgres;

use lumina_db::DatabaseError;
use lumina_db::models::{
    NewChain, NewCmcCryptocurrency, NewProtocol, NewStablecoin, NewYieldPool, OverviewKind,
    OverviewSnapshot,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save_chains(&self, rows: Vec<NewChain>) -> Result<usize, DatabaseError>;

    async fn save_protocols(&self, rows: Vec<NewProtocol>) -> Result<usize, DatabaseError>;

    async fn save_stablecoins(&self, rows: Vec<NewStablecoin>) -> Result<usize, DatabaseError>;

    async fn save_yield_pools(&self, rows: Vec<NewYieldPool>) -> Result<usize, DatabaseError>;

    /// Writes the info row and its protocols in one transaction, returning the
    /// number of protocols saved.
    async fn save_overview(
        &self,
        kind: OverviewKind,
        snapshot: OverviewSnapshot,
    ) -> Result<usize, DatabaseError>;

    async fn save_cmc_listings(
        &self,
        rows: Vec<NewCmcCryptocurrency>,
    ) -> Result<usize, DatabaseError>;

    /// Names of the stored chains with the highest TVL, highest first.
    async fn top_chains(&self, limit: usize) -> Result<Vec<String>, DatabaseError>;
}
