use crate::cmc::types::{CmcListing, ListingSort};
use crate::defillama::types::{
    ChainResponse, OverviewResponse, ProtocolResponse, StablecoinResponse, YieldPoolResponse,
};
use crate::error::SourceError;

/// DefiLlama family of APIs (main, stablecoins and yields hosts).
#[async_trait::async_trait]
pub trait DefiLlamaSource: Send + Sync {
    async fn get_chains(&self) -> Result<Vec<ChainResponse>, SourceError>;

    async fn get_protocols(&self) -> Result<Vec<ProtocolResponse>, SourceError>;

    async fn get_stablecoins(&self) -> Result<Vec<StablecoinResponse>, SourceError>;

    async fn get_yield_pools(&self) -> Result<Vec<YieldPoolResponse>, SourceError>;

    async fn get_dex_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError>;

    async fn get_fee_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError>;

    async fn get_open_interest_overview(&self) -> Result<OverviewResponse, SourceError>;
}

/// Market-cap listings provider.
#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn get_listings(
        &self,
        sort: ListingSort,
        limit: u32,
    ) -> Result<Vec<CmcListing>, SourceError>;
}
