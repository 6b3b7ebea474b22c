//! Recurring jobs.
//!
//! Every job is a `run(&JobContext)` function registered here with a cron expression in
//! São Paulo time. A failing run is logged and retried on the next tick. Inside a run,
//! failures of one event or guild are logged and the batch continues.

pub mod attendance_check;
pub mod clan_invite_check;
pub mod clan_role_sync;
pub mod cleanup_completed_events;
pub mod confirmation_reminder;
pub mod context;
pub mod daily_event_digest;
pub mod delete_event_messages;
pub mod event_reminder;
pub mod inactivity_check;
pub mod update_leaderboard;
pub mod update_ranking_roles;
pub mod voice_channel_create;
pub mod voice_channel_delete;

use std::future::Future;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, util::time::TIMEZONE};

pub use context::JobContext;

/// Registers every job and starts the scheduler.
///
/// The returned scheduler must be kept alive for the jobs to keep running.
pub async fn start_scheduler(ctx: JobContext) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    add_job(&scheduler, &ctx, "event_reminder", "0 * * * * *", |ctx| async move {
        event_reminder::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "confirmation_reminder", "0 * * * * *", |ctx| async move {
        confirmation_reminder::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "voice_channel_create", "0 * * * * *", |ctx| async move {
        voice_channel_create::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "voice_channel_delete", "0 * * * * *", |ctx| async move {
        voice_channel_delete::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "attendance_check", "0 */5 * * * *", |ctx| async move {
        attendance_check::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "delete_event_messages", "0 */5 * * * *", |ctx| async move {
        delete_event_messages::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "cleanup_completed_events", "0 0 * * * *", |ctx| async move {
        cleanup_completed_events::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "daily_event_digest", "0 0 8,16 * * *", |ctx| async move {
        daily_event_digest::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "update_leaderboard", "0 0 7 * * *", |ctx| async move {
        update_leaderboard::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "update_ranking_roles", "0 5 0 * * Sat", |ctx| async move {
        update_ranking_roles::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "inactivity_check", "0 0 3 * * *", |ctx| async move {
        inactivity_check::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "clan_role_sync", "0 30 * * * *", |ctx| async move {
        clan_role_sync::run(&ctx).await
    })
    .await?;
    add_job(&scheduler, &ctx, "clan_invite_check", "0 */15 * * * *", |ctx| async move {
        clan_invite_check::run(&ctx).await
    })
    .await?;

    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(scheduler)
}

async fn add_job<F, Fut>(
    scheduler: &JobScheduler,
    ctx: &JobContext,
    name: &'static str,
    schedule: &str,
    task: F,
) -> Result<(), AppError>
where
    F: Fn(JobContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), AppError>> + Send + 'static,
{
    let ctx = ctx.clone();

    let job = Job::new_async_tz(schedule, TIMEZONE, move |_uuid, _lock| {
        let ctx = ctx.clone();
        let task = task.clone();

        Box::pin(async move {
            tracing::debug!("Running {}", name);
            if let Err(e) = task(ctx).await {
                tracing::error!("Error running {}: {}", name, e);
            }
        })
    })?;

    scheduler.add(job).await?;

    Ok(())
}
