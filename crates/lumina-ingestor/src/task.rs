use std::sync::Arc;

use pragma_common::services::{Service, ServiceRunner};

use crate::scheduler::{CronSchedule, ScheduledJob, Scheduler};

/// Runs one [`ScheduledJob`] on its cron schedule until the service group stops.
pub struct SchedulerTask {
    job: Arc<dyn ScheduledJob>,
    schedule: CronSchedule,
}

impl SchedulerTask {
    pub fn new(job: Arc<dyn ScheduledJob>, schedule: CronSchedule) -> Self {
        Self { job, schedule }
    }
}

#[async_trait::async_trait]
impl Service for SchedulerTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let job = self.job.clone();
        let schedule = self.schedule.clone();

        runner.spawn_loop(move |ctx| async move {
            let scheduler = Scheduler::new(job, schedule);

            if let Some(result) = ctx
                .run_until_cancelled(scheduler.run_forever(ctx.token.clone()))
                .await
            {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
