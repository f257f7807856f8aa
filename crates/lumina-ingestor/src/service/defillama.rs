use std::future::Future;
use std::sync::Arc;

use lumina_db::DatabaseError;
use lumina_db::models::OverviewKind;
use lumina_sources::{DefiLlamaSource, OverviewResponse, SourceError};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

use crate::config::IngestorConfig;
use crate::guard::RunGuard;
use crate::mapping::{
    map_all, map_chain, map_overview, map_protocol, map_stablecoin, map_yield_pool,
};
use crate::report::{CycleOutcome, CycleReport, StepStats};
use crate::store::SnapshotStore;

/// Pulls the DefiLlama family of endpoints into the store, one cycle per tick.
pub struct DefiLlamaIngestor {
    source: Arc<dyn DefiLlamaSource>,
    store: Arc<dyn SnapshotStore>,
    config: IngestorConfig,
    guard: RunGuard,
}

impl DefiLlamaIngestor {
    pub fn new(
        source: Arc<dyn DefiLlamaSource>,
        store: Arc<dyn SnapshotStore>,
        config: IngestorConfig,
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

    /// Runs a full cycle, or returns [`CycleOutcome::Skipped`] right away when
    /// the previous one has not finished.
    ///
    /// Steps never abort the cycle: each failure is logged, counted in the
    /// report and the next step runs.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            warn!("[DefiLlamaIngestor] ⏭️ Previous cycle still running, skipping tick");
            return CycleOutcome::Skipped;
        };

        info!("[DefiLlamaIngestor] 🦙 Starting DefiLlama ingestion cycle...");
        let started = Instant::now();
        let mut report = CycleReport::default();

        let ranked_chains = self.sync_chains(&mut report).await;

        let source = &self.source;
        let store = &self.store;
        report.protocols = sync_step(
            "protocols",
            source.get_protocols(),
            map_protocol,
            |rows| store.save_protocols(rows),
        )
        .await;
        report.stablecoins = sync_step(
            "stablecoins",
            source.get_stablecoins(),
            map_stablecoin,
            |rows| store.save_stablecoins(rows),
        )
        .await;
        report.yield_pools = sync_step(
            "yield pools",
            source.get_yield_pools(),
            map_yield_pool,
            |rows| store.save_yield_pools(rows),
        )
        .await;

        let perp = self.source.get_open_interest_overview().await;
        self.store_overview(OverviewKind::Perp, None, perp, &mut report)
            .await;

        let chains = match ranked_chains {
            Some(chains) => chains,
            None => self.stored_chains(&mut report).await,
        };
        for (position, chain) in chains.iter().take(self.config.max_chains).enumerate() {
            if position > 0 {
                sleep(self.config.chain_delay).await;
            }
            report.chains_visited.push(chain.clone());

            let dex = self.source.get_dex_overview(chain).await;
            self.store_overview(OverviewKind::Dex, Some(chain), dex, &mut report)
                .await;
            let fee = self.source.get_fee_overview(chain).await;
            self.store_overview(OverviewKind::Fee, Some(chain), fee, &mut report)
                .await;
        }

        report.elapsed = started.elapsed();
        info!(
            "[DefiLlamaIngestor] ✅ Cycle completed in {}s. {}",
            report.elapsed.as_secs(),
            report
        );
        CycleOutcome::Completed(report)
    }

    /// Saves the chain list and returns the chain names ranked by TVL, or
    /// `None` when the chains could not be fetched or saved.
    async fn sync_chains(&self, report: &mut CycleReport) -> Option<Vec<String>> {
        let chains = match self.source.get_chains().await {
            Ok(chains) => chains,
            Err(e) => {
                error!(error = %e, "[DefiLlamaIngestor] 🔴 Failed to fetch chains");
                report.chains = StepStats::failed();
                return None;
            }
        };

        let fetched = chains.len();
        let (mut rows, dropped) = map_all(chains, map_chain);
        rows.sort_by(|a, b| b.tvl.cmp(&a.tvl).then_with(|| a.name.cmp(&b.name)));
        let ranked = rows.iter().map(|chain| chain.name.clone()).collect();

        match self.store.save_chains(rows).await {
            Ok(saved) => {
                debug!(saved, dropped, "[DefiLlamaIngestor] Saved chains");
                report.chains = StepStats {
                    fetched,
                    saved,
                    dropped,
                    failed: false,
                };
                Some(ranked)
            }
            Err(e) => {
                error!(error = %e, "[DefiLlamaIngestor] 🔴 Failed to save chains");
                report.chains = StepStats {
                    fetched,
                    dropped,
                    ..StepStats::failed()
                };
                None
            }
        }
    }

    async fn stored_chains(&self, report: &mut CycleReport) -> Vec<String> {
        match self.store.top_chains(self.config.max_chains).await {
            Ok(chains) => {
                warn!(
                    count = chains.len(),
                    "[DefiLlamaIngestor] ⚠️ Using stored chains for the per-chain overviews"
                );
                report.used_stored_chains = true;
                chains
            }
            Err(e) => {
                error!(error = %e, "[DefiLlamaIngestor] 🔴 Failed to load stored chains, skipping per-chain overviews");
                Vec::new()
            }
        }
    }

    async fn store_overview(
        &self,
        kind: OverviewKind,
        chain: Option<&str>,
        response: Result<OverviewResponse, SourceError>,
        report: &mut CycleReport,
    ) {
        let label = chain.unwrap_or("all chains");
        let stats = report.overview_mut(kind);

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!(chain = %label, error = %e, "[DefiLlamaIngestor] 🔴 Failed to fetch {kind} overview");
                stats.failed += 1;
                return;
            }
        };

        match self.store.save_overview(kind, map_overview(chain, response)).await {
            Ok(protocols) => {
                debug!(chain = %label, protocols, "[DefiLlamaIngestor] Saved {kind} overview");
                stats.saved += 1;
                stats.protocols += protocols;
            }
            Err(e) => {
                error!(chain = %label, error = %e, "[DefiLlamaIngestor] 🔴 Failed to save {kind} overview, rolled back");
                stats.failed += 1;
            }
        }
    }
}

/// Fetch, map and save one batch endpoint.
async fn sync_step<T, R, Save>(
    step: &'static str,
    fetch: impl Future<Output = Result<Vec<T>, SourceError>>,
    mapper: fn(T) -> Option<R>,
    save: impl FnOnce(Vec<R>) -> Save,
) -> StepStats
where
    Save: Future<Output = Result<usize, DatabaseError>>,
{
    let items = match fetch.await {
        Ok(items) => items,
        Err(e) => {
            error!(step, error = %e, "[DefiLlamaIngestor] 🔴 Failed to fetch {step}");
            return StepStats::failed();
        }
    };

    let fetched = items.len();
    let (rows, dropped) = map_all(items, mapper);
    if dropped > 0 {
        warn!(step, dropped, "[DefiLlamaIngestor] Dropped {step} entries without a natural key");
    }

    match save(rows).await {
        Ok(saved) => {
            debug!(step, saved, "[DefiLlamaIngestor] Saved {step}");
            StepStats {
                fetched,
                saved,
                dropped,
                failed: false,
            }
        }
        Err(e) => {
            error!(step, error = %e, "[DefiLlamaIngestor] 🔴 Failed to save {step}");
            StepStats {
                fetched,
                dropped,
                ..StepStats::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    use lumina_sources::{
        ChainResponse, OverviewProtocolResponse, ProtocolResponse, StablecoinResponse,
        YieldPoolResponse,
    };
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    use super::*;
    use crate::store::MemoryStore;

    /// Source answering from fixed data and recording every call.
    #[derive(Default)]
    struct ScriptedSource {
        chains: Vec<(String, Decimal)>,
        fail_chains: bool,
        fail_protocols: bool,
        failing_dex: HashSet<String>,
        failing_fee: HashSet<String>,
        protocol_names: Vec<String>,
        calls: Mutex<Vec<String>>,
        gated: bool,
        entered: Notify,
        release: Notify,
    }

    impl ScriptedSource {
        fn with_chains(chains: &[(&str, i64)]) -> Self {
            Self {
                chains: chains
                    .iter()
                    .map(|(name, tvl)| ((*name).to_string(), Decimal::from(*tvl)))
                    .collect(),
                ..Default::default()
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn overview(chain: Option<&str>, protocols: &[String]) -> OverviewResponse {
            OverviewResponse {
                chain: chain.map(str::to_string),
                protocols: protocols
                    .iter()
                    .map(|id| OverviewProtocolResponse {
                        defillama_id: Some(id.clone()),
                        name: Some(id.clone()),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }
        }
    }

    fn upstream_error(path: &str) -> SourceError {
        SourceError::Status {
            url: format!("https://api.llama.fi/{path}"),
            status: 500,
            body: "upstream failure".into(),
        }
    }

    #[async_trait::async_trait]
    impl DefiLlamaSource for ScriptedSource {
        async fn get_chains(&self) -> Result<Vec<ChainResponse>, SourceError> {
            self.record("chains".into());
            if self.gated {
                self.entered.notify_one();
                self.release.notified().await;
            }
            if self.fail_chains {
                return Err(upstream_error("v2/chains"));
            }
            Ok(self
                .chains
                .iter()
                .map(|(name, tvl)| ChainResponse {
                    name: Some(name.clone()),
                    tvl: Some(*tvl),
                    ..Default::default()
                })
                .collect())
        }

        async fn get_protocols(&self) -> Result<Vec<ProtocolResponse>, SourceError> {
            self.record("protocols".into());
            if self.fail_protocols {
                return Err(upstream_error("protocols"));
            }
            Ok(self
                .protocol_names
                .iter()
                .map(|id| ProtocolResponse {
                    id: Some(id.clone()),
                    name: Some(id.clone()),
                    ..Default::default()
                })
                .collect())
        }

        async fn get_stablecoins(&self) -> Result<Vec<StablecoinResponse>, SourceError> {
            self.record("stablecoins".into());
            Ok(vec![StablecoinResponse {
                symbol: Some("USDC".into()),
                ..Default::default()
            }])
        }

        async fn get_yield_pools(&self) -> Result<Vec<YieldPoolResponse>, SourceError> {
            self.record("yield_pools".into());
            Ok(vec![
                YieldPoolResponse {
                    pool: Some("pool-1".into()),
                    ..Default::default()
                },
                YieldPoolResponse::default(),
            ])
        }

        async fn get_dex_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError> {
            self.record(format!("dex:{chain}"));
            if self.failing_dex.contains(chain) {
                return Err(upstream_error("overview/dexs"));
            }
            Ok(Self::overview(Some(chain), &[format!("dex-{chain}")]))
        }

        async fn get_fee_overview(&self, chain: &str) -> Result<OverviewResponse, SourceError> {
            self.record(format!("fee:{chain}"));
            if self.failing_fee.contains(chain) {
                return Err(upstream_error("overview/fees"));
            }
            Ok(Self::overview(Some(chain), &[format!("fee-{chain}")]))
        }

        async fn get_open_interest_overview(&self) -> Result<OverviewResponse, SourceError> {
            self.record("perp".into());
            Ok(Self::overview(None, &["hyperliquid".to_string()]))
        }
    }

    fn no_delay() -> IngestorConfig {
        IngestorConfig {
            chain_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn ingestor(
        source: Arc<ScriptedSource>,
        store: Arc<MemoryStore>,
        config: IngestorConfig,
    ) -> DefiLlamaIngestor {
        DefiLlamaIngestor::new(source, store, config)
    }

    fn completed(outcome: CycleOutcome) -> CycleReport {
        match outcome {
            CycleOutcome::Completed(report) => report,
            CycleOutcome::Skipped => panic!("cycle was skipped"),
        }
    }

    #[tokio::test]
    async fn test_cycle_runs_steps_in_order_and_chains_by_tvl() {
        let source = Arc::new(ScriptedSource::with_chains(&[("Base", 100), ("Eth", 500)]));
        let store = Arc::new(MemoryStore::new());
        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert_eq!(
            source.calls(),
            vec![
                "chains",
                "protocols",
                "stablecoins",
                "yield_pools",
                "perp",
                "dex:Eth",
                "fee:Eth",
                "dex:Base",
                "fee:Base",
            ]
        );
        assert_eq!(report.chains_visited, vec!["Eth", "Base"]);
        assert_eq!(report.chains.saved, 2);
        assert_eq!(report.yield_pools.saved, 1);
        assert_eq!(report.yield_pools.dropped, 1);
        assert_eq!(report.perp.saved, 1);
        assert_eq!(report.dex.saved, 2);
        assert_eq!(report.fee.saved, 2);
        assert_eq!(report.failures(), 0);
        assert!(!report.used_stored_chains);

        assert!(store.overview_info(OverviewKind::Perp, None).await.is_some());
        assert!(store.overview_info(OverviewKind::Dex, Some("Eth")).await.is_some());
        assert_eq!(store.overview_protocol_count(OverviewKind::Fee).await, 2);
        assert_eq!(store.stablecoin_count().await, 1);
    }

    #[tokio::test]
    async fn test_chain_loop_is_capped() {
        let chains: Vec<(String, i64)> = (0..200).map(|i| (format!("chain-{i:03}"), i)).collect();
        let borrowed: Vec<(&str, i64)> = chains.iter().map(|(n, t)| (n.as_str(), *t)).collect();
        let source = Arc::new(ScriptedSource::with_chains(&borrowed));
        let store = Arc::new(MemoryStore::new());

        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert_eq!(report.chains.saved, 200);
        assert_eq!(report.chains_visited.len(), 150);
        assert_eq!(report.chains_visited[0], "chain-199");
        assert_eq!(report.chains_visited[149], "chain-050");
        let dex_calls = source.calls().iter().filter(|c| c.starts_with("dex:")).count();
        assert_eq!(dex_calls, 150);

        let small = IngestorConfig {
            max_chains: 3,
            ..no_delay()
        };
        let report = completed(ingestor(source, store, small).run_cycle().await);
        assert_eq!(report.chains_visited.len(), 3);
    }

    #[tokio::test]
    async fn test_overview_failures_are_isolated() {
        let source = Arc::new(ScriptedSource {
            failing_fee: HashSet::from(["Eth".to_string()]),
            failing_dex: HashSet::from(["Base".to_string()]),
            ..ScriptedSource::with_chains(&[("Eth", 500), ("Base", 100), ("Arb", 50)])
        });
        let store = Arc::new(MemoryStore::new());

        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        let calls = source.calls();
        for expected in ["dex:Eth", "fee:Eth", "dex:Base", "fee:Base", "dex:Arb", "fee:Arb"] {
            assert!(calls.contains(&expected.to_string()), "missing call {expected}");
        }
        assert_eq!(report.dex.saved, 2);
        assert_eq!(report.dex.failed, 1);
        assert_eq!(report.fee.saved, 2);
        assert_eq!(report.fee.failed, 1);
        assert!(store.overview_info(OverviewKind::Fee, Some("Eth")).await.is_none());
        assert!(store.overview_info(OverviewKind::Fee, Some("Base")).await.is_some());
        assert!(store.overview_info(OverviewKind::Dex, Some("Eth")).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_step_does_not_stop_later_steps() {
        let source = Arc::new(ScriptedSource {
            fail_protocols: true,
            ..ScriptedSource::with_chains(&[("Eth", 500)])
        });
        let store = Arc::new(MemoryStore::new());

        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert!(report.protocols.failed);
        assert!(!report.stablecoins.failed);
        assert_eq!(report.dex.saved, 1);
        assert_eq!(report.failures(), 1);
    }

    #[tokio::test]
    async fn test_mid_transaction_failure_commits_nothing() {
        let source = Arc::new(ScriptedSource::with_chains(&[("Eth", 500)]));
        let store = Arc::new(MemoryStore::new());
        store.set_fail_after_overview_info(true).await;

        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert_eq!(report.dex.failed, 1);
        assert_eq!(report.fee.failed, 1);
        assert_eq!(report.perp.failed, 1);
        assert!(store.overview_info(OverviewKind::Dex, Some("Eth")).await.is_none());
        assert_eq!(store.overview_protocol_count(OverviewKind::Dex).await, 0);
        assert!(store.chain("Eth").await.is_some());
    }

    #[tokio::test]
    async fn test_chain_failure_falls_back_to_stored_chains() {
        let store = Arc::new(MemoryStore::new());
        let seed = Arc::new(ScriptedSource::with_chains(&[("Eth", 500), ("Base", 100)]));
        completed(ingestor(seed, store.clone(), no_delay()).run_cycle().await);

        let source = Arc::new(ScriptedSource {
            fail_chains: true,
            ..Default::default()
        });
        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert!(report.chains.failed);
        assert!(report.used_stored_chains);
        assert_eq!(report.chains_visited, vec!["Eth", "Base"]);
        assert_eq!(report.dex.saved, 2);
    }

    #[tokio::test]
    async fn test_unsaved_chains_fall_back_and_survive_store_errors() {
        let source = Arc::new(ScriptedSource::with_chains(&[("Eth", 500)]));
        let store = Arc::new(MemoryStore::new());
        store.set_fail_on_save_chains(true).await;
        store.set_fail_on_top_chains(true).await;

        let report =
            completed(ingestor(source.clone(), store.clone(), no_delay()).run_cycle().await);

        assert!(report.chains.failed);
        assert_eq!(report.chains.fetched, 1);
        assert!(report.chains_visited.is_empty());
        assert_eq!(report.perp.saved, 1);
    }

    #[tokio::test]
    async fn test_concurrent_cycle_is_skipped() {
        let source = Arc::new(ScriptedSource {
            gated: true,
            ..ScriptedSource::with_chains(&[("Eth", 500)])
        });
        let store = Arc::new(MemoryStore::new());
        let ingestor = Arc::new(ingestor(source.clone(), store, no_delay()));

        let running = {
            let ingestor = ingestor.clone();
            tokio::spawn(async move { ingestor.run_cycle().await })
        };
        source.entered.notified().await;

        assert!(ingestor.run_cycle().await.is_skipped());
        assert_eq!(
            source.calls().iter().filter(|c| c.as_str() == "chains").count(),
            1
        );

        source.release.notify_one();
        let outcome = running.await.unwrap();
        assert!(!outcome.is_skipped());
        assert_eq!(ingestor.guard().state(), crate::guard::RunState::Idle);
    }

    #[tokio::test]
    async fn test_guard_released_after_failing_cycle() {
        let source = Arc::new(ScriptedSource {
            fail_chains: true,
            fail_protocols: true,
            ..Default::default()
        });
        let store = Arc::new(MemoryStore::new());
        store.set_fail_on_top_chains(true).await;
        let ingestor = ingestor(source, store, no_delay());

        let first = completed(ingestor.run_cycle().await);
        assert!(first.failures() >= 2);
        assert!(!ingestor.run_cycle().await.is_skipped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_chains() {
        let source = Arc::new(ScriptedSource::with_chains(&[("A", 3), ("B", 2), ("C", 1)]));
        let store = Arc::new(MemoryStore::new());
        let ingestor = ingestor(source, store, IngestorConfig::default());

        let started = Instant::now();
        let report = completed(ingestor.run_cycle().await);
        let elapsed = started.elapsed();

        assert_eq!(report.chains_visited.len(), 3);
        assert!(elapsed >= Duration::from_millis(3_000), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(4_500), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn test_repeated_cycles_keep_latest_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let first = Arc::new(ScriptedSource {
            protocol_names: vec!["aave".into()],
            ..ScriptedSource::with_chains(&[("Eth", 500)])
        });
        completed(ingestor(first, store.clone(), no_delay()).run_cycle().await);

        let second = Arc::new(ScriptedSource {
            protocol_names: vec!["aave".into()],
            ..ScriptedSource::with_chains(&[("Eth", 900)])
        });
        completed(ingestor(second, store.clone(), no_delay()).run_cycle().await);

        assert_eq!(store.chain_count().await, 1);
        assert_eq!(store.chain("Eth").await.unwrap().tvl, Decimal::from(900));
        assert!(store.protocol("aave").await.is_some());
    }
}
