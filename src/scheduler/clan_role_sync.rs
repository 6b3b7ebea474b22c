//! Keeps the clan role in line with the Bungie clan roster.

use crate::{
    data::server_config::ServerConfigRepository, error::AppError, service::clan::ClanService,
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let Some(clan) = ctx.clan() else {
        return Ok(());
    };

    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_clan_admin()
        .await?;
    let service = ClanService::new(&ctx.db, ctx.discord.as_ref(), clan);

    for config in configs.iter().filter(|c| c.clan_role_id.is_some()) {
        match service.sync_roles(config).await {
            Ok(report) if report.added.is_empty() && report.removed.is_empty() => {}
            Ok(report) => tracing::info!(
                "Clan role sync of guild {}: {} added, {} removed",
                config.guild_id,
                report.added.len(),
                report.removed.len()
            ),
            Err(e) => tracing::error!(
                "Failed clan role sync of guild {}: {}",
                config.guild_id,
                e
            ),
        }
    }

    Ok(())
}
