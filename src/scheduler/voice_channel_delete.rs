//! Removes event voice channels once they are empty, three hours after the start.

use chrono::Duration;

use crate::{data::event::EventRepository, error::AppError, model::event::Event};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let events = EventRepository::new(&ctx.db)
        .get_with_voice_channel_before(now - Duration::hours(3))
        .await?;

    for event in events {
        if let Err(e) = release(ctx, &event).await {
            tracing::error!(
                "Failed to remove voice channel of event {}: {}",
                event.id,
                e
            );
        }
    }

    Ok(())
}

/// Forgets a channel that no longer exists and deletes one nobody is in. Occupied
/// channels are left for the next run.
async fn release(ctx: &JobContext, event: &Event) -> Result<(), AppError> {
    let Some(channel_id) = event.voice_channel_id else {
        return Ok(());
    };
    let repo = EventRepository::new(&ctx.db);

    match ctx
        .discord
        .voice_channel_members(event.guild_id, channel_id)
        .await?
    {
        None => {
            repo.set_voice_channel_id(event.id, None).await?;
        }
        Some(members) if members.is_empty() => {
            match ctx.discord.delete_channel(channel_id).await {
                Ok(()) => {}
                Err(e) if e.is_missing_or_forbidden() => {
                    tracing::debug!("Voice channel {} already gone: {}", channel_id, e)
                }
                Err(e) => return Err(e),
            }
            repo.set_voice_channel_id(event.id, None).await?;
            tracing::info!(
                "Deleted voice channel {} of event {}",
                channel_id,
                event.id
            );
        }
        Some(_) => {}
    }

    Ok(())
}
