//! Periodic competitor discovery using apalis
//!
//! Runs `run_scout` on a cron schedule when `SCOUT_CRON_SECONDS` is set.

use apalis::prelude::*;
use apalis_cron::{CronStream, Schedule};
use apalis_sql::postgres::PostgresStorage;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;

use crate::services::scout::run_scout;
use crate::services::youtube::{SearchQuery, VideoPlatform};
use crate::store::ScoutStore;

/// Job input - one tick of the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutJob {
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
}

impl From<chrono::DateTime<chrono::Utc>> for ScoutJob {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        ScoutJob { scheduled_at: dt }
    }
}

/// Shared context for scheduled scouting
#[derive(Clone)]
pub struct ScoutJobContext {
    pub videos: Arc<dyn VideoPlatform>,
    pub store: Arc<dyn ScoutStore>,
    pub query: SearchQuery,
}

/// Job handler. Always returns Ok; a failed run is logged and the next tick retries.
async fn process_scout_job(job: ScoutJob, ctx: Data<ScoutJobContext>) -> Result<(), Error> {
    scout_tick(&job, &ctx).await;
    Ok(())
}

async fn scout_tick(job: &ScoutJob, ctx: &ScoutJobContext) {
    match run_scout(ctx.videos.as_ref(), ctx.store.as_ref(), &ctx.query).await {
        Ok(report) => {
            tracing::info!(
                scheduled_at = %job.scheduled_at,
                found = report.found,
                inserted = report.inserted,
                "[jobs] Scheduled scout complete"
            );
        }
        Err(e) => {
            tracing::error!(scheduled_at = %job.scheduled_at, error = %e, "[jobs] Scheduled scout failed");
        }
    }
}

/// Periods that divide their cron field evenly, so every gap is the same
const SECOND_STEPS: [u64; 11] = [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30];
const HOUR_STEPS: [u64; 7] = [1, 2, 3, 4, 6, 8, 12];
const DAY: u64 = 86_400;

/// Largest evenly spaced period not above `seconds`. Minute steps reuse the
/// second steps; anything of a day or more runs daily.
pub fn effective_period(seconds: u64) -> u64 {
    if seconds >= DAY {
        return DAY;
    }
    SECOND_STEPS
        .iter()
        .copied()
        .chain(SECOND_STEPS.iter().map(|m| m * 60))
        .chain(HOUR_STEPS.iter().map(|h| h * 3600))
        .take_while(|&p| p <= seconds)
        .last()
        .unwrap_or(1)
}

/// Cron expression firing every `effective_period(seconds)`
pub fn schedule_expression(seconds: u64) -> String {
    match effective_period(seconds) {
        p if p < 60 => format!("*/{} * * * * *", p),
        p if p < 3600 => format!("0 */{} * * * *", p / 60),
        p if p < DAY => format!("0 0 */{} * * *", p / 3600),
        _ => "0 0 0 * * *".to_string(),
    }
}

/// Start the scout worker
pub async fn run_scout_worker(pool: PgPool, ctx: ScoutJobContext, cron_seconds: u64) {
    let period = effective_period(cron_seconds);
    if period != cron_seconds {
        tracing::warn!(
            requested = cron_seconds,
            effective = period,
            "[jobs] SCOUT_CRON_SECONDS does not divide its cron field, rounding down"
        );
    }
    let schedule_expr = schedule_expression(cron_seconds);

    if let Err(e) = PostgresStorage::setup(&pool).await {
        tracing::error!(error = %e, "[jobs] Failed to set up apalis storage, scheduler disabled");
        return;
    }

    let schedule = match Schedule::from_str(&schedule_expr) {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::error!(expr = %schedule_expr, error = %e, "[jobs] Invalid scout schedule");
            return;
        }
    };

    let storage: PostgresStorage<ScoutJob> = PostgresStorage::new(pool);
    let backend = CronStream::new(schedule).pipe_to_storage(storage);

    tracing::info!(expr = %schedule_expr, period_secs = period, query = %ctx.query.text, "[jobs] Scout worker starting");

    let worker = WorkerBuilder::new("scout-worker")
        .data(ctx)
        .backend(backend)
        .build_fn(process_scout_job);

    if let Err(e) = Monitor::new().register(worker).run().await {
        tracing::error!(error = %e, "[jobs] Scout worker monitor failed");
    }
}
