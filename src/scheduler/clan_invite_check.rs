//! Announces new clan applications and prunes expired link and invite state.

use crate::{
    data::{
        oauth_state::OauthStateRepository, pending_clan_invite::PendingClanInviteRepository,
        server_config::ServerConfigRepository,
    },
    error::AppError,
    service::clan::ClanService,
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();

    let expired_invites = PendingClanInviteRepository::new(&ctx.db)
        .delete_expired(now)
        .await?;
    let expired_states = OauthStateRepository::new(&ctx.db)
        .delete_expired(now)
        .await?;
    if expired_invites > 0 || expired_states > 0 {
        tracing::debug!(
            "Pruned {} clan invites and {} OAuth states",
            expired_invites,
            expired_states
        );
    }

    let Some(clan) = ctx.clan() else {
        return Ok(());
    };

    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_clan_admin()
        .await?;
    let service = ClanService::new(&ctx.db, ctx.discord.as_ref(), clan);

    for config in configs.iter().filter(|c| c.mod_channel_id.is_some()) {
        match service
            .announce_applicants(config, now, ctx.post_delay())
            .await
        {
            Ok(announced) if announced.is_empty() => {}
            Ok(announced) => tracing::info!(
                "Announced {} clan applications in guild {}",
                announced.len(),
                config.guild_id
            ),
            Err(e) => tracing::error!(
                "Failed to check clan applications of guild {}: {}",
                config.guild_id,
                e
            ),
        }
    }

    Ok(())
}
