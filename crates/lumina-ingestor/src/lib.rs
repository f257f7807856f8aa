//! Scheduled ingestion of DefiLlama and CoinMarketCap snapshots.
//!
//! Each ingestor runs one sequential cycle per cron tick: fetch from a source,
//! map into insertable rows and upsert through a [`store::SnapshotStore`].

pub mod config;
pub mod guard;
pub mod mapping;
pub mod report;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod task;

pub use config::{CmcConfig, IngestorConfig, ScheduleConfig};
pub use guard::{RunGuard, RunPermit, RunState};
pub use report::{CycleOutcome, CycleReport};
pub use scheduler::{CronSchedule, ScheduleError, ScheduledJob, Scheduler, parse_timezone};
pub use service::{CmcIngestor, DefiLlamaIngestor};
pub use store::{MemoryStore, PgStore, SnapshotStore};
pub use task::SchedulerTask;
