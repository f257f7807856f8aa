mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::services::{Service, ServiceGroup};
use pragma_common::telemetry::init_telemetry;

use lumina_api::{ApiService, AppState};
use lumina_db::{init_pool, run_migrations};
use lumina_ingestor::{
    CmcConfig, CmcIngestor, CronSchedule, DefiLlamaIngestor, IngestorConfig, PgStore,
    ScheduleConfig, SchedulerTask, parse_timezone,
};
use lumina_sources::{CmcClient, DefiLlamaClient, SourceUrls};

use crate::cli::LuminaCli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = LuminaCli::parse();

    let app_name = "lumina_ingest";
    if let Err(e) = init_telemetry(app_name, cli.otel_collector_endpoint.clone()) {
        anyhow::bail!("Could not init telemetry: {e}");
    }

    let schedule = ScheduleConfig {
        defillama_cron: cli.cron_defillama.clone(),
        cmc_cron: cli.cron_cmc.clone(),
        timezone: parse_timezone(&cli.timezone).context("invalid TZ")?,
    };
    let defillama_schedule = CronSchedule::parse(&schedule.defillama_cron, schedule.timezone)
        .context("invalid CRON_DEFILLAMA")?;
    let cmc_schedule =
        CronSchedule::parse(&schedule.cmc_cron, schedule.timezone).context("invalid CRON_CMC")?;

    let pool = init_pool(app_name, &cli.database_url, cli.database_max_connections)
        .context("could not build the database pool")?;
    run_migrations(&pool)
        .await
        .context("could not run database migrations")?;

    let store = Arc::new(PgStore::new(pool.clone()));
    let http_timeout = Duration::from_secs(cli.http_timeout_secs);

    let defillama = DefiLlamaClient::new(
        SourceUrls {
            api: cli.defillama_api_url.clone(),
            stablecoins: cli.defillama_stablecoins_url.clone(),
            yields: cli.defillama_yields_url.clone(),
        },
        http_timeout,
    )
    .context("could not build the DefiLlama client")?;
    let defillama_ingestor = DefiLlamaIngestor::new(
        Arc::new(defillama),
        store.clone(),
        IngestorConfig {
            max_chains: cli.defillama_max_chains,
            chain_delay: Duration::from_millis(cli.defillama_chain_delay_ms),
        },
    );

    let mut services = ServiceGroup::default().with(SchedulerTask::new(
        Arc::new(defillama_ingestor),
        defillama_schedule,
    ));

    let cmc_config = CmcConfig {
        api_key: cli.cmc_api_key.clone(),
        base_url: cli.cmc_api_base_url.clone(),
        sort: cli.cmc_listing_sort,
        limit: cli.cmc_listing_limit,
    };
    if let Some(api_key) = cmc_config.api_key() {
        let client = CmcClient::new(&cmc_config.base_url, api_key, http_timeout)
            .context("could not build the CoinMarketCap client")?;
        let cmc_ingestor = CmcIngestor::new(Arc::new(client), store, cmc_config);
        services = services.with(SchedulerTask::new(Arc::new(cmc_ingestor), cmc_schedule));
    } else {
        tracing::warn!("CMC_API_KEY is not set, CoinMarketCap ingestion is disabled");
    }

    if cli.api_enabled {
        let app_state = AppState { pool };
        services = services.with(ApiService::new(app_state, "0.0.0.0", cli.api_port));
    } else {
        tracing::info!("Query API disabled via API_ENABLED");
    }

    services.start_and_drive_to_end().await?;

    Ok(())
}
