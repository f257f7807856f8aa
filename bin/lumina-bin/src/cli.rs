use clap::Parser;
use lumina_sources::ListingSort;
use lumina_sources::cmc::{DEFAULT_CMC_API_URL, DEFAULT_LISTING_LIMIT};
use lumina_sources::defillama::{DEFAULT_API_URL, DEFAULT_STABLECOINS_URL, DEFAULT_YIELDS_URL};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct LuminaCli {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Size of the database connection pool
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = lumina_db::DEFAULT_MAX_CONNECTIONS)]
    pub database_max_connections: usize,

    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Serve the read-only query API
    #[arg(long, env = "API_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub api_enabled: bool,

    /// Cron expression of the DefiLlama cycle
    #[arg(long, env = "CRON_DEFILLAMA", default_value = lumina_ingestor::config::DEFAULT_CRON)]
    pub cron_defillama: String,

    /// Cron expression of the CoinMarketCap cycle
    #[arg(long, env = "CRON_CMC", default_value = lumina_ingestor::config::DEFAULT_CRON)]
    pub cron_cmc: String,

    /// IANA timezone the cron expressions are evaluated in
    #[arg(long, env = "TZ", default_value = "Asia/Seoul")]
    pub timezone: String,

    #[arg(long, env = "DEFILLAMA_API_URL", default_value = DEFAULT_API_URL)]
    pub defillama_api_url: String,

    #[arg(long, env = "DEFILLAMA_STABLECOINS_URL", default_value = DEFAULT_STABLECOINS_URL)]
    pub defillama_stablecoins_url: String,

    #[arg(long, env = "DEFILLAMA_YIELDS_URL", default_value = DEFAULT_YIELDS_URL)]
    pub defillama_yields_url: String,

    /// Number of chains (by TVL) whose dex and fee overviews are fetched
    #[arg(long, env = "DEFILLAMA_MAX_CHAINS", default_value = "150")]
    pub defillama_max_chains: usize,

    /// Pause between two chains, in milliseconds
    #[arg(long, env = "DEFILLAMA_CHAIN_DELAY_MS", default_value = "1500")]
    pub defillama_chain_delay_ms: u64,

    #[arg(long, env = "CMC_API_BASE_URL", default_value = DEFAULT_CMC_API_URL)]
    pub cmc_api_base_url: String,

    /// CoinMarketCap API key; the CMC cycle is disabled without one
    #[arg(long, env = "CMC_API_KEY")]
    pub cmc_api_key: Option<String>,

    #[arg(long, env = "CMC_LISTING_LIMIT", default_value_t = DEFAULT_LISTING_LIMIT)]
    pub cmc_listing_limit: u32,

    /// Sort order of the listings, e.g. market_cap or volume_24h
    #[arg(long, env = "CMC_LISTING_SORT", default_value = "market_cap")]
    pub cmc_listing_sort: ListingSort,

    /// Timeout of every outbound HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    pub http_timeout_secs: u64,
}
