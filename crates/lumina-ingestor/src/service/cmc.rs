use std::sync::Arc;

use lumina_sources::MarketDataSource;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::config::CmcConfig;
use crate::guard::RunGuard;
use crate::mapping::map_cmc_listing;
use crate::report::{CycleOutcome, CycleReport, StepStats};
use crate::store::SnapshotStore;

/// Pulls the CoinMarketCap listings into the store.
pub struct CmcIngestor {
    source: Arc<dyn MarketDataSource>,
    store: Arc<dyn SnapshotStore>,
    config: CmcConfig,
    guard: RunGuard,
}

impl CmcIngestor {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        store: Arc<dyn SnapshotStore>,
        config: CmcConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
            guard: RunGuard::new(),
        }
    }

    pub const fn guard(&self) -> &RunGuard {
        &self.guard
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            warn!("[CmcIngestor] ⏭️ Previous cycle still running, skipping tick");
            return CycleOutcome::Skipped;
        };

        info!("[CmcIngestor] 🪙 Starting CoinMarketCap listings cycle...");
        let started = Instant::now();
        let mut report = CycleReport::default();

        match self.source.get_listings(self.config.sort, self.config.limit).await {
            Ok(listings) => {
                let fetched = listings.len();
                let rows = listings.into_iter().map(map_cmc_listing).collect();
                report.cmc = match self.store.save_cmc_listings(rows).await {
                    Ok(saved) => StepStats {
                        fetched,
                        saved,
                        dropped: 0,
                        failed: false,
                    },
                    Err(e) => {
                        error!(error = %e, "[CmcIngestor] 🔴 Failed to save listings");
                        StepStats {
                            fetched,
                            ..StepStats::failed()
                        }
                    }
                };
            }
            Err(e) => {
                error!(
                    sort = %self.config.sort,
                    limit = self.config.limit,
                    error = %e,
                    "[CmcIngestor] 🔴 Failed to fetch listings"
                );
                report.cmc = StepStats::failed();
            }
        }

        report.elapsed = started.elapsed();
        info!(
            "[CmcIngestor] ✅ Cycle completed in {}s. Saved: {}, Errors: {}",
            report.elapsed.as_secs(),
            report.cmc.saved,
            report.failures()
        );
        CycleOutcome::Completed(report)
    }
}
