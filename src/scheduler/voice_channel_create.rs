//! Opens a voice channel for events starting in about an hour.

use chrono::Duration;

use crate::{
    data::event::EventRepository,
    error::AppError,
    model::event::Event,
};

use super::JobContext;

/// Discord's limit on channel names.
const MAX_CHANNEL_NAME_CHARS: usize = 100;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let repo = EventRepository::new(&ctx.db);
    let events = repo
        .get_needing_voice_channel(now + Duration::minutes(59), now + Duration::minutes(61))
        .await?;

    for event in events {
        match ctx
            .discord
            .create_voice_channel(event.guild_id, &channel_name(&event), event.channel_id)
            .await
        {
            Ok(channel_id) => match repo.set_voice_channel_id(event.id, Some(channel_id)).await {
                Ok(()) => tracing::info!(
                    "Created voice channel {} for event {}",
                    channel_id,
                    event.id
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to store voice channel {} of event {}: {}",
                        channel_id,
                        event.id,
                        e
                    );
                    if let Err(e) = ctx.discord.delete_channel(channel_id).await {
                        tracing::error!(
                            "Failed to remove unrecorded voice channel {}: {}",
                            channel_id,
                            e
                        );
                    }
                }
            },
            Err(e) => tracing::error!(
                "Failed to create voice channel for event {}: {}",
                event.id,
                e
            ),
        }
    }

    Ok(())
}

fn channel_name(event: &Event) -> String {
    format!("{} {}", event.activity_type, event.title)
        .chars()
        .take(MAX_CHANNEL_NAME_CHARS)
        .collect()
}
