pub mod types;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SourceError;
use crate::http::{endpoint, fetch_json, http_client};
use crate::lenient::LenientList;
use crate::traits::DefiLlamaSource;
use types::{
    ChainResponse, OverviewResponse, ProtocolResponse, StablecoinResponse, StablecoinsEnvelope,
    YieldPoolResponse, YieldPoolsEnvelope,
};

pub const DEFAULT_API_URL: &str = "https://api.llama.fi";
pub const DEFAULT_STABLECOINS_URL: &str = "https://stablecoins.llama.fi";
pub const DEFAULT_YIELDS_URL: &str = "https://yields.llama.fi";

/// Overview endpoints are asked to leave out their historical chart series.
const OVERVIEW_QUERY: [(&str, &str); 2] = [
    ("excludeTotalDataChart", "true"),
    ("excludeTotalDataChartBreakdown", "true"),
];

/// Base URLs of the three DefiLlama hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub api: String,
    pub stablecoins: String,
    pub yields: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            stablecoins: DEFAULT_STABLECOINS_URL.to_string(),
            yields: DEFAULT_YIELDS_URL.to_string(),
        }
    }
}

impl SourceUrls {
    /// Points every host at the same base, used against local mock servers.
    pub fn single(base: &str) -> Self {
        Self {
            api: base.to_string(),
            stablecoins: base.to_string(),
            yields: base.to_string(),
        }
    }
}

pub struct DefiLlamaClient {
    http_client: Client,
    urls: SourceUrls,
}

impl DefiLlamaClient {
    pub fn new(urls: SourceUrls, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            urls,
        })
    }

    pub const fn urls(&self) -> &SourceUrls {
        &self.urls
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        fetch_json(self.http_client.get(url.clone()), &url).await
    }

    fn overview_url(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = endpoint(&self.urls.api, segments)?;
        url.query_pairs_mut().extend_pairs(OVERVIEW_QUERY);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl DefiLlamaSource for DefiLlamaClient {
    async fn get_chains(&self) -> Result<Vec<ChainResponse>, SourceError> {
        let url = endpoint(&self.urls.api, &["v2", "chains"])?;
        let LenientList(chains): LenientList<ChainResponse> = self.get(url).await?;
        Ok(chains)
    }

    async fn get_protocols(&self) -> Result<Vec<ProtocolResponse>, SourceError> {
        let url = endpoint(&self.urls.api, &["protocols"])?;
        let LenientList(protocols): LenientList<ProtocolResponse> = self.get(url).await?;
        Ok(protocols)
    }

    async fn get_stablecoins(&self) -> Result<Vec<StablecoinResponse>, SourceError> {
        let url = endpoint(&self.urls.stablecoins, &["stablecoins"])?;
        let envelope: StablecoinsEnvelope = self.get(url).await?;
        Ok(envelope.pegged_assets)
    }

    async fn get_yield_pools(&self) -> Result<Vec<YieldPoolResponse>, SourceError> {
        let url = endpoint(&self.urls.yields, &["pools"])?;
        let envelope: YieldPoolsEnvelope = self.get(url).await?;
        Ok(envelope.data)
    }

    async fn get_dex_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError> {
        let url = self.overview_url(&["overview", "dexs", chain])?;
        self.get(url).await
    }

    async fn get_fee_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError> {
        let url = self.overview_url(&["overview", "fees", chain])?;
        self.get(url).await
    }

    async fn get_open_interest_overview(&self) -> Result<OverviewResponse, SourceError> {
        let url = self.overview_url(&["overview", "open-interest"])?;
        self.get(url).await
    }
}
