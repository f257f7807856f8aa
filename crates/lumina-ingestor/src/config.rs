use std::time::Duration;

use chrono_tz::Tz;
use lumina_sources::ListingSort;
use lumina_sources::cmc::{DEFAULT_CMC_API_URL, DEFAULT_LISTING_LIMIT};

pub const DEFAULT_CRON: &str = "*/5 * * * *";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

/// Configuration for a DefiLlama ingestion cycle.
#[derive(Debug, Clone)]
pub struct IngestorConfig {
    /// Upper bound on the chains whose dex and fee overviews are fetched.
    pub max_chains: usize,
    /// Pause between two chains of the per-chain overview loop.
    pub chain_delay: Duration,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            max_chains: 150,
            chain_delay: Duration::from_millis(1_500),
        }
    }
}

/// Configuration for the CoinMarketCap listings cycle.
#[derive(Debug, Clone)]
pub struct CmcConfig {
    /// The ingestor is disabled when no key is configured.
    pub api_key: Option<String>,
    pub base_url: String,
    pub sort: ListingSort,
    pub limit: u32,
}

impl Default for CmcConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_CMC_API_URL.to_string(),
            sort: ListingSort::default(),
            limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl CmcConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

/// Cron expressions of both jobs and the timezone they are evaluated in.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub defillama_cron: String,
    pub cmc_cron: String,
    pub timezone: Tz,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            defillama_cron: DEFAULT_CRON.to_string(),
            cmc_cron: DEFAULT_CRON.to_string(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}
