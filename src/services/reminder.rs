use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::bot::gateway::MessagingGateway;
use crate::config::ReminderConfig;
use crate::error::BotError;
use crate::utils::datetime::format_reminder_timestamp;

/// Hour of day (local) the reminder goes out.
pub const FIRE_HOUR: u32 = 8;
/// Days before month end for the regular reminder.
pub const DAYS_BEFORE_MONTH_END: i64 = 5;
const PROXIMITY_HOURS: i64 = 120;

/// Next reminder time after `now`.
///
/// Normally five days before the last day of the month at 08:00. Once fewer
/// than 120 hours remain until the last day, the target moves to
/// `first day of next month - whole days left`, which keeps it ahead of `now`
/// as the month runs out.
pub fn next_monthly_run<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);
    let first_of_next = first_of_next_month(first_of_month);
    let last_of_month = first_of_next - Duration::days(1);

    let last_midnight = at_local(&tz, last_of_month, 0);
    let until_end = last_midnight.signed_duration_since(now.clone());

    let target_date = if until_end.num_hours() < PROXIMITY_HOURS {
        let days_left = until_end.num_hours() / 24;
        first_of_next - Duration::days(days_left)
    } else {
        last_of_month - Duration::days(DAYS_BEFORE_MONTH_END)
    };

    at_local(&tz, target_date, FIRE_HOUR)
}

fn first_of_next_month(first_of_month: NaiveDate) -> NaiveDate {
    let (year, month) = if first_of_month.month() == 12 {
        (first_of_month.year() + 1, 1)
    } else {
        (first_of_month.year(), first_of_month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first_of_month)
}

// Local wall-clock time on `date`; DST gaps resolve to the UTC reading.
fn at_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    let naive = date.and_hms_opt(hour, 0, 0).unwrap_or_default();
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Text of the reminder sent at `now`.
pub fn reminder_text<Tz: TimeZone>(now: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} {}", format_reminder_timestamp(now), message)
}

#[derive(Clone)]
struct ReminderJob {
    gateway: Arc<dyn MessagingGateway>,
    config: ReminderConfig,
}

impl ReminderJob {
    async fn send(&self) -> Result<(), BotError> {
        let text = reminder_text(&Local::now(), &self.config.message);
        self.gateway.send_text(self.config.chat_id, &text).await
    }
}

/// Monthly reminder driven by a chain of one-shot jobs.
///
/// Each run schedules the next one from the current time, so month lengths
/// never drift the schedule.
pub struct ReminderService {
    job: ReminderJob,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(
        gateway: Arc<dyn MessagingGateway>,
        config: ReminderConfig,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            job: ReminderJob { gateway, config },
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), JobSchedulerError> {
        let (job, next) = build_job(self.job.clone(), Local::now())?;
        self.scheduler.add(job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Reminder service started - next reminder to chat {} at {}",
            self.job.config.chat_id,
            next
        );
        Ok(())
    }

    /// Stops the scheduler together with its pending timer.
    pub async fn stop(&mut self) -> Result<(), JobSchedulerError> {
        self.scheduler.shutdown().await?;
        tracing::info!("Reminder service stopped");
        Ok(())
    }

    // Manual trigger for testing
    pub async fn send_now(&self) -> Result<(), BotError> {
        self.job.send().await
    }
}

// One-shot job firing at the next run after `now`.
fn build_job(
    reminder: ReminderJob,
    now: DateTime<Local>,
) -> Result<(Job, DateTime<Local>), JobSchedulerError> {
    let next = next_monthly_run(&now);
    let delay = (next - now).to_std().unwrap_or_default();

    let job = Job::new_one_shot_async(delay, move |_uuid, scheduler| {
        let reminder = reminder.clone();
        Box::pin(async move {
            match fire(reminder, &scheduler, Local::now()).await {
                Ok(next) => tracing::info!("Next reminder scheduled for {}", next),
                Err(e) => tracing::error!("Failed to schedule next reminder: {}", e),
            }
        })
    })?;

    Ok((job, next))
}

// Sends the reminder, then chains the next job whatever the outcome.
async fn fire(
    reminder: ReminderJob,
    scheduler: &JobScheduler,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, JobSchedulerError> {
    run_once(&reminder).await;
    let (job, next) = build_job(reminder, now)?;
    scheduler.add(job).await?;
    Ok(next)
}

// Runs the send on its own task so a panic is contained and the chain continues.
async fn run_once(reminder: &ReminderJob) -> bool {
    let task = reminder.clone();
    match tokio::spawn(async move { task.send().await }).await {
        Ok(Ok(())) => {
            tracing::info!("Reminder sent to chat {}", reminder.config.chat_id);
            true
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to send reminder: {}", e);
            false
        }
        Err(e) if e.is_panic() => {
            tracing::error!("Reminder job panicked: {}", e);
            false
        }
        Err(e) => {
            tracing::warn!("Reminder job cancelled: {}", e);
            false
        }
    }
}
