use std::fmt;
use std::time::Duration;

use lumina_db::models::OverviewKind;

/// Result of one scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Another cycle of the same ingestor was still running.
    Skipped,
}

impl CycleOutcome {
    pub const fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Skipped => None,
        }
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Outcome of a single fetch+save step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepStats {
    pub fetched: usize,
    pub saved: usize,
    /// Entries dropped by the mapper for lacking a natural key.
    pub dropped: usize,
    pub failed: bool,
}

impl StepStats {
    pub const fn failed() -> Self {
        Self {
            fetched: 0,
            saved: 0,
            dropped: 0,
            failed: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewStats {
    pub saved: usize,
    pub failed: usize,
    pub protocols: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub chains: StepStats,
    pub protocols: StepStats,
    pub stablecoins: StepStats,
    pub yield_pools: StepStats,
    pub perp: OverviewStats,
    pub dex: OverviewStats,
    pub fee: OverviewStats,
    pub cmc: StepStats,
    /// Chains visited by the per-chain loop, in order.
    pub chains_visited: Vec<String>,
    /// The per-chain loop used stored chains because the chains step failed.
    pub used_stored_chains: bool,
    pub elapsed: Duration,
}

impl CycleReport {
    pub const fn overview_mut(&mut self, kind: OverviewKind) -> &mut OverviewStats {
        match kind {
            OverviewKind::Dex => &mut self.dex,
            OverviewKind::Fee => &mut self.fee,
            OverviewKind::Perp => &mut self.perp,
        }
    }

    pub fn failures(&self) -> usize {
        [
            &self.chains,
            &self.protocols,
            &self.stablecoins,
            &self.yield_pools,
            &self.cmc,
        ]
        .iter()
        .filter(|step| step.failed)
        .count()
            + self.perp.failed
            + self.dex.failed
            + self.fee.failed
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chains={} protocols={} stablecoins={} yield_pools={} perp={} dex={} fee={} cmc={} visited={} failures={}",
            self.chains.saved,
            self.protocols.saved,
            self.stablecoins.saved,
            self.yield_pools.saved,
            self.perp.saved,
            self.dex.saved,
            self.fee.saved,
            self.cmc.saved,
            self.chains_visited.len(),
            self.failures()
        )
    }
}
