//! Completes active events that started more than two hours ago.

use chrono::Duration;

use crate::{data::event::EventRepository, error::AppError, service::event::EventService};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let stale = EventRepository::new(&ctx.db)
        .get_stale_active(now - Duration::hours(2))
        .await?;

    let service = EventService::new(
        &ctx.db,
        ctx.discord.as_ref(),
        ctx.clock.as_ref(),
        ctx.dm_delay,
    );
    for event in stale {
        match service.complete_event(&event).await {
            Ok(Some(_)) => tracing::info!("Completed event {}", event.id),
            Ok(None) => {}
            Err(e) => tracing::error!("Failed to complete event {}: {}", event.id, e),
        }
    }

    Ok(())
}
