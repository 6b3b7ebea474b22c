//! Daily inactivity warnings and removals.

use crate::{
    data::server_config::ServerConfigRepository, error::AppError,
    service::inactivity::InactivityService,
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let configs = ServerConfigRepository::new(&ctx.db)
        .get_with_mod_channel()
        .await?;
    let service = InactivityService::new(&ctx.db, ctx.discord.as_ref(), ctx.clan(), ctx.dm_delay);

    for config in configs {
        match service.run(&config, now).await {
            Ok(report) => tracing::info!(
                "Inactivity check of guild {}: {} removed, {} warned",
                config.guild_id,
                report.removed.len(),
                report.warned.len()
            ),
            Err(e) => tracing::error!(
                "Failed inactivity check of guild {}: {}",
                config.guild_id,
                e
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scheduler::context::test::{context, now},
        service::gateway::fake::{DiscordCall, FakeDiscord},
    };
    use chrono::Duration;
    use sea_orm::DbErr;
    use std::sync::Arc;
    use test_utils::{
        builder::TestBuilder,
        factory::{event::EventFactory, rsvp::RsvpFactory, server_config::ServerConfigFactory},
    };

    /// Tests a guild with a mod channel and a member absent for a month, without the
    /// Bungie integration.
    ///
    /// Expected: Member DMed and kicked, mod note posted
    #[tokio::test]
    async fn removes_inactive_member() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        ServerConfigFactory::new(db, "1")
            .mod_channel_id("900")
            .build()
            .await?;
        let event = EventFactory::new(db)
            .guild_id("1")
            .event_time(now() - Duration::days(30))
            .build()
            .await?;
        RsvpFactory::new(db, event.id, "10")
            .attendance("attended")
            .build()
            .await?;

        let fake = Arc::new(FakeDiscord::new().with_member(10, false, &[]));
        run(&context(db, &fake, None)).await.unwrap();

        assert_eq!(fake.dm_recipients(), vec![10]);
        assert!(fake.calls().contains(&DiscordCall::KickMember {
            guild_id: 1,
            user_id: 10
        }));
        assert_eq!(fake.sent_messages()[0].0, 900);

        Ok(())
    }
}
