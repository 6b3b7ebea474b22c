//! Refreshes the weekly voice leaderboard of each guild.

use crate::{
    data::server_config::ServerConfigRepository, error::AppError,
    service::ranking::RankingService,
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_ranking_channel()
        .await?;
    let service = RankingService::new(&ctx.db, ctx.discord.as_ref());

    for config in configs {
        let Some(channel_id) = config.ranking_channel_id else {
            continue;
        };
        if let Err(e) = service
            .post_leaderboard(config.guild_id, channel_id, now)
            .await
        {
            tracing::error!(
                "Failed to update leaderboard of guild {}: {}",
                config.guild_id,
                e
            );
        }
    }

    Ok(())
}
