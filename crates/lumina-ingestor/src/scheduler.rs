use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use thiserror::Error;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::service::{CmcIngestor, DefiLlamaIngestor};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression '{expression}': {source}")]
    InvalidCron {
        expression: String,
        #[source]
        source: cron::error::Error,
    },
    #[error("unknown timezone '{0}'")]
    InvalidTimezone(String),
}

pub fn parse_timezone(name: &str) -> Result<Tz, ScheduleError> {
    Tz::from_str(name.trim()).map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}

/// A cron expression evaluated in a fixed timezone.
///
/// Accepts the classic five-field form (minute resolution) as well as the
/// six and seven field forms with leading seconds and trailing years.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    expression: String,
    schedule: Schedule,
    timezone: Tz,
}

impl CronSchedule {
    pub fn parse(expression: &str, timezone: Tz) -> Result<Self, ScheduleError> {
        let normalized = normalize(expression);
        let schedule =
            Schedule::from_str(&normalized).map_err(|source| ScheduleError::InvalidCron {
                expression: expression.to_string(),
                source,
            })?;
        Ok(Self {
            expression: expression.trim().to_string(),
            schedule,
            timezone,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// First fire time strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&after.with_timezone(&self.timezone))
            .next()
            .map(|at| at.with_timezone(&Utc))
    }
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Five-field expressions get a leading `0` seconds field, and their
/// day-of-week field is rewritten from classic numbering (0 or 7 = Sunday,
/// 1 = Monday) to day names, which the `cron` crate numbers differently.
fn normalize(expression: &str) -> String {
    let mut fields: Vec<String> = expression.split_whitespace().map(str::to_string).collect();
    if fields.len() != 5 {
        return fields.join(" ");
    }
    if let Some(days) = day_names(&fields[4]) {
        fields[4] = days;
    }
    format!("0 {}", fields.join(" "))
}

/// Day-of-week field as a list of day names, or `None` when the field is
/// not understood (it is then passed through and rejected by the parser).
fn day_names(field: &str) -> Option<String> {
    if field == "*" || field == "?" {
        return Some(field.to_string());
    }

    let mut days = [false; 7];
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => (range, step.parse::<usize>().ok().filter(|s| *s > 0)?),
            None => (part, 1),
        };
        let (start, end) = match range {
            "*" => (0, 6),
            _ => match range.split_once('-') {
                Some((start, end)) => (day_number(start)?, day_number(end)?),
                None if step > 1 => (day_number(range)?, 6),
                None => {
                    let day = day_number(range)?;
                    (day, day)
                }
            },
        };
        if start > end {
            return None;
        }
        for day in (start..=end).step_by(step) {
            days[day % 7] = true;
        }
    }

    if days.iter().all(|set| *set) {
        return Some("*".to_string());
    }
    let names: Vec<&str> = DAY_NAMES
        .iter()
        .zip(days)
        .filter_map(|(name, set)| set.then_some(*name))
        .collect();
    Some(names.join(","))
}

/// Classic day number (0..=7, Sunday being both 0 and 7) or a day name.
fn day_number(token: &str) -> Option<usize> {
    if let Ok(number) = token.parse::<usize>() {
        return (number <= 7).then_some(number);
    }
    let prefix = token.get(..3)?;
    DAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(prefix))
}

#[async_trait::async_trait]
pub trait ScheduledJob: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn run(&self) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl ScheduledJob for DefiLlamaIngestor {
    fn name(&self) -> &'static str {
        "defillama"
    }

    async fn run(&self) -> anyhow::Result<()> {
        self.run_cycle().await;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ScheduledJob for CmcIngestor {
    fn name(&self) -> &'static str {
        "cmc"
    }

    async fn run(&self) -> anyhow::Result<()> {
        self.run_cycle().await;
        Ok(())
    }
}

/// Fires a job on every tick of its schedule.
pub struct Scheduler {
    job: Arc<dyn ScheduledJob>,
    schedule: CronSchedule,
}

impl Scheduler {
    pub fn new(job: Arc<dyn ScheduledJob>, schedule: CronSchedule) -> Self {
        Self { job, schedule }
    }

    /// Sleeps until each fire time and spawns the job on its own task, so a
    /// slow run never delays the next tick. Returns once `shutdown` fires.
    pub async fn run_forever(&self, shutdown: CancellationToken) -> anyhow::Result<()> {
        info!(
            job = self.job.name(),
            cron = self.schedule.expression(),
            timezone = %self.schedule.timezone(),
            "[Scheduler] ⏰ Job scheduled"
        );

        loop {
            let now = Utc::now();
            let Some(next) = self.schedule.next_after(now) else {
                warn!(job = self.job.name(), "[Scheduler] No upcoming fire time, stopping");
                break;
            };
            let wait = (next - now).to_std().unwrap_or_default();

            tokio::select! {
                () = shutdown.cancelled() => {
                    info!(job = self.job.name(), "[Scheduler] Shutdown requested");
                    break;
                }
                () = sleep(wait) => {}
            }

            let job = self.job.clone();
            tokio::spawn(async move {
                if let Err(e) = job.run().await {
                    error!(job = job.name(), error = ?e, "[Scheduler] 🔴 Job run failed");
                }
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_normalize_prepends_seconds_to_five_fields() {
        assert_eq!(normalize("*/5 * * * *"), "0 */5 * * * *");
        assert_eq!(normalize("  30  * * * * *"), "30 * * * * *");
        assert_eq!(normalize("0 0 12 * * * 2030"), "0 0 12 * * * 2030");
    }

    #[test]
    fn test_normalize_rewrites_classic_day_numbers() {
        assert_eq!(normalize("0 9 * * 1"), "0 0 9 * * Mon");
        assert_eq!(normalize("0 9 * * 0"), "0 0 9 * * Sun");
        assert_eq!(normalize("0 9 * * 7"), "0 0 9 * * Sun");
        assert_eq!(normalize("0 9 * * 1-5"), "0 0 9 * * Mon,Tue,Wed,Thu,Fri");
        assert_eq!(normalize("0 9 * * 5-7"), "0 0 9 * * Sun,Fri,Sat");
        assert_eq!(normalize("0 9 * * 0-6"), "0 0 9 * * *");
        assert_eq!(normalize("0 9 * * */2"), "0 0 9 * * Sun,Tue,Thu,Sat");
        assert_eq!(normalize("0 9 * * mon,WED"), "0 0 9 * * Mon,Wed");
        // Six-field expressions already use the crate's own numbering.
        assert_eq!(normalize("0 0 9 * * 2"), "0 0 9 * * 2");
    }

    #[test]
    fn test_classic_day_numbers_fire_on_the_right_day() {
        // 2025-01-01 is a Wednesday.
        let monday = CronSchedule::parse("0 9 * * 1", chrono_tz::UTC).unwrap();
        assert_eq!(
            monday.next_after(utc("2025-01-01T00:00:00Z")),
            Some(utc("2025-01-06T09:00:00Z"))
        );

        let weekdays = CronSchedule::parse("0 9 * * 1-5", chrono_tz::UTC).unwrap();
        assert_eq!(
            weekdays.next_after(utc("2025-01-03T10:00:00Z")),
            Some(utc("2025-01-06T09:00:00Z"))
        );

        let sunday = CronSchedule::parse("0 9 * * 0", chrono_tz::UTC).unwrap();
        assert_eq!(
            sunday.next_after(utc("2025-01-01T00:00:00Z")),
            Some(utc("2025-01-05T09:00:00Z"))
        );
        assert_eq!(sunday.expression(), "0 9 * * 0");
    }

    #[test]
    fn test_every_five_minutes() {
        let schedule = CronSchedule::parse("*/5 * * * *", chrono_tz::Asia::Seoul).unwrap();
        assert_eq!(schedule.expression(), "*/5 * * * *");
        assert_eq!(
            schedule.next_after(utc("2025-01-01T00:03:00Z")),
            Some(utc("2025-01-01T00:05:00Z"))
        );
        assert_eq!(
            schedule.next_after(utc("2025-01-01T00:05:00Z")),
            Some(utc("2025-01-01T00:10:00Z"))
        );
    }

    #[test]
    fn test_fire_times_follow_the_timezone() {
        let schedule = CronSchedule::parse("0 9 * * *", chrono_tz::Asia::Seoul).unwrap();
        // 09:30 in Seoul: today's run has passed.
        let next = schedule.next_after(utc("2025-01-01T00:30:00Z")).unwrap();
        assert_eq!(next, utc("2025-01-02T00:00:00Z"));
        assert_eq!(
            next.with_timezone(&chrono_tz::Asia::Seoul),
            chrono_tz::Asia::Seoul
                .with_ymd_and_hms(2025, 1, 2, 9, 0, 0)
                .unwrap()
        );

        let utc_schedule = CronSchedule::parse("0 9 * * *", chrono_tz::UTC).unwrap();
        assert_eq!(
            utc_schedule.next_after(utc("2025-01-01T00:30:00Z")),
            Some(utc("2025-01-01T09:00:00Z"))
        );
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            CronSchedule::parse("every five minutes", chrono_tz::UTC),
            Err(ScheduleError::InvalidCron { .. })
        ));
        assert_eq!(parse_timezone("Asia/Seoul").unwrap(), chrono_tz::Asia::Seoul);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ScheduleError::InvalidTimezone(_))
        ));
    }

    struct CountingJob {
        runs: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ScheduledJob for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self) -> anyhow::Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("job exploded");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_scheduler_fires_and_survives_job_errors() {
        let job = Arc::new(CountingJob {
            runs: AtomicUsize::new(0),
            fail: true,
        });
        let schedule = CronSchedule::parse("* * * * * *", chrono_tz::UTC).unwrap();
        let scheduler = Scheduler::new(job.clone(), schedule);
        let shutdown = CancellationToken::new();

        let handle = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { scheduler.run_forever(shutdown).await })
        };

        tokio::time::timeout(Duration::from_secs(5), async {
            while job.runs.load(Ordering::SeqCst) < 2 {
                sleep(Duration::from_millis(50)).await;
            }
        })
        .await
        .expect("job should run on consecutive ticks");

        shutdown.cancel();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_scheduler_stops_on_shutdown() {
        let job = Arc::new(CountingJob {
            runs: AtomicUsize::new(0),
            fail: false,
        });
        let schedule = CronSchedule::parse("0 0 1 1 *", chrono_tz::UTC).unwrap();
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        Scheduler::new(job.clone(), schedule)
            .run_forever(shutdown)
            .await
            .unwrap();
        assert_eq!(job.runs.load(Ordering::SeqCst), 0);
    }
}
