//! Posts the upcoming events to each guild's digest channel.

use serenity::all::CreateMessage;

use crate::{
    data::server_config::ServerConfigRepository,
    error::AppError,
    service::event::listing::{build_listing, LISTING_HEADER},
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_digest_channel()
        .await?;

    for config in configs {
        let Some(channel_id) = config.digest_channel_id else {
            continue;
        };

        let listing = match build_listing(&ctx.db, config.guild_id, now).await {
            Ok(Some(listing)) => listing,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!("Failed to build digest for guild {}: {}", config.guild_id, e);
                continue;
            }
        };

        let message = CreateMessage::new().content(format!("{}\n{}", LISTING_HEADER, listing));
        if let Err(e) = ctx.discord.send_message(channel_id, message).await {
            tracing::error!("Failed to post digest in guild {}: {}", config.guild_id, e);
        }
    }

    Ok(())
}
