//! Weekly tier role update.

use crate::{
    data::{ranking_roles::RankingRolesRepository, server_config::ServerConfigRepository},
    error::AppError,
    service::ranking::RankingService,
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_ranking_channel()
        .await?;
    let roles_repo = RankingRolesRepository::new(&ctx.db);
    let service = RankingService::new(&ctx.db, ctx.discord.as_ref());

    for config in configs {
        let Some(channel_id) = config.ranking_channel_id else {
            continue;
        };
        let Some(roles) = roles_repo.get(config.guild_id).await? else {
            tracing::debug!("Guild {} has no ranking roles", config.guild_id);
            continue;
        };

        if let Err(e) = service
            .update_roles(config.guild_id, channel_id, &roles, now)
            .await
        {
            tracing::error!(
                "Failed to update ranking roles of guild {}: {}",
                config.guild_id,
                e
            );
        }
    }

    Ok(())
}
