//! `/config` operations.

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        bungie_profile::BungieProfileRepository, designated_channel::DesignatedChannelRepository,
        ranking_roles::RankingRolesRepository, server_config::ServerConfigRepository,
    },
    error::AppError,
    model::{
        ranking::TIER_ROLES,
        server_config::{RankingRoles, ServerConfig},
    },
    service::gateway::DiscordGateway,
};

pub struct ServerConfigService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a dyn DiscordGateway,
}

impl<'a> ServerConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection, discord: &'a dyn DiscordGateway) -> Self {
        Self { db, discord }
    }

    pub async fn get(&self, guild_id: u64) -> Result<ServerConfig, AppError> {
        Ok(ServerConfigRepository::new(self.db)
            .get_or_default(guild_id)
            .await?)
    }

    pub async fn add_event_channel(&self, guild_id: u64, channel_id: u64) -> Result<(), AppError> {
        DesignatedChannelRepository::new(self.db)
            .add(guild_id, channel_id)
            .await?;

        Ok(())
    }

    /// # Returns
    /// - `Ok(true)` - Channel was designated and no longer is
    /// - `Ok(false)` - Channel was not designated
    pub async fn remove_event_channel(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(DesignatedChannelRepository::new(self.db)
            .remove(channel_id)
            .await?)
    }

    /// Sets or, with `None`, disables the daily digest.
    pub async fn set_digest_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<ServerConfig, AppError> {
        self.update(guild_id, |config| config.digest_channel_id = channel_id)
            .await
    }

    /// Enables the weekly ranking in a channel.
    ///
    /// Each tier role is looked up by name among the guild roles and created when
    /// missing, so running the command again reuses the same roles.
    pub async fn setup_ranking(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<RankingRoles, AppError> {
        let existing = self.discord.guild_roles(guild_id).await?;

        let mut tier_role_ids = [0u64; 4];
        for (i, (name, color)) in TIER_ROLES.iter().enumerate() {
            tier_role_ids[i] = match existing.iter().find(|r| r.name == *name) {
                Some(role) => role.id,
                None => {
                    let role_id = self
                        .discord
                        .create_role(guild_id, name, *color, false)
                        .await?;
                    tracing::info!("Created ranking role '{}' in guild {}", name, guild_id);
                    role_id
                }
            };
        }

        let roles = RankingRolesRepository::new(self.db)
            .upsert(guild_id, tier_role_ids)
            .await?;
        self.update(guild_id, |config| config.ranking_channel_id = Some(channel_id))
            .await?;

        Ok(roles)
    }

    pub async fn set_inactivity(
        &self,
        guild_id: u64,
        mod_channel_id: u64,
        penalty_role_id: Option<u64>,
    ) -> Result<ServerConfig, AppError> {
        self.update(guild_id, |config| {
            config.mod_channel_id = Some(mod_channel_id);
            config.penalty_role_id = penalty_role_id;
        })
        .await
    }

    /// Chooses whose Bungie token performs clan actions.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - The user has not linked a Bungie account
    pub async fn set_clan_admin(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<ServerConfig, AppError> {
        if BungieProfileRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "<@{}> has not linked a Bungie account yet. Ask them to run /link-bungie first.",
                user_id
            )));
        }

        self.update(guild_id, |config| config.clan_admin_id = Some(user_id))
            .await
    }

    pub async fn set_clan_role(&self, guild_id: u64, role_id: u64) -> Result<ServerConfig, AppError> {
        self.update(guild_id, |config| config.clan_role_id = Some(role_id))
            .await
    }

    /// Summary for `/config show`.
    pub async fn describe(&self, guild_id: u64) -> Result<String, AppError> {
        let config = self.get(guild_id).await?;
        let channels = DesignatedChannelRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?;
        let ranking = RankingRolesRepository::new(self.db).get(guild_id).await?;

        let channel = |id: Option<u64>| id.map_or("Not set".to_string(), |id| format!("<#{}>", id));
        let role = |id: Option<u64>| id.map_or("Not set".to_string(), |id| format!("<@&{}>", id));
        let event_channels = if channels.is_empty() {
            "Any channel".to_string()
        } else {
            channels
                .iter()
                .map(|id| format!("<#{}>", id))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let tiers = match ranking {
            Some(roles) => roles
                .tier_role_ids
                .iter()
                .map(|id| format!("<@&{}>", id))
                .collect::<Vec<_>>()
                .join(" "),
            None => "Not set".to_string(),
        };

        Ok(format!(
            "**Server configuration**\n\
             Event channels: {}\n\
             Digest channel: {}\n\
             Ranking channel: {}\n\
             Ranking roles: {}\n\
             Mod channel: {}\n\
             Penalty role: {}\n\
             Clan role: {}\n\
             Clan admin: {}",
            event_channels,
            channel(config.digest_channel_id),
            channel(config.ranking_channel_id),
            tiers,
            channel(config.mod_channel_id),
            role(config.penalty_role_id),
            role(config.clan_role_id),
            config
                .clan_admin_id
                .map_or("Not set".to_string(), |id| format!("<@{}>", id)),
        ))
    }

    async fn update(
        &self,
        guild_id: u64,
        apply: impl FnOnce(&mut ServerConfig),
    ) -> Result<ServerConfig, AppError> {
        let repo = ServerConfigRepository::new(self.db);
        let mut config = repo.get_or_default(guild_id).await?;
        apply(&mut config);

        let saved = repo.upsert(&config).await?;
        tracing::info!("Updated configuration of guild {}", guild_id);

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::gateway::fake::{DiscordCall, FakeDiscord};
    use sea_orm::DbErr;
    use test_utils::builder::TestBuilder;

    /// Tests that updates only touch their own fields.
    ///
    /// Expected: Digest and inactivity settings coexist, clearing the digest keeps the rest
    #[tokio::test]
    async fn updates_preserve_other_fields() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_config_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let fake = FakeDiscord::new();
        let service = ServerConfigService::new(db, &fake);

        service.set_digest_channel(1, Some(100)).await.unwrap();
        service.set_inactivity(1, 200, Some(300)).await.unwrap();
        let config = service.set_digest_channel(1, None).await.unwrap();

        assert_eq!(config.digest_channel_id, None);
        assert_eq!(config.mod_channel_id, Some(200));
        assert_eq!(config.penalty_role_id, Some(300));

        Ok(())
    }

    /// Tests ranking setup with one tier role already present.
    ///
    /// Expected: Existing role reused by name, the other three created
    #[tokio::test]
    async fn ranking_setup_reuses_roles_by_name() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_config_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let fake = FakeDiscord::new().with_role(77, "Herald of Destiny");
        let service = ServerConfigService::new(db, &fake);

        let roles = service.setup_ranking(1, 500).await.unwrap();

        assert_eq!(roles.tier_role_ids[1], 77);
        let created = fake
            .calls()
            .into_iter()
            .filter(|c| matches!(c, DiscordCall::CreateRole { .. }))
            .count();
        assert_eq!(created, 3);
        assert_eq!(service.get(1).await.unwrap().ranking_channel_id, Some(500));

        Ok(())
    }

    /// Tests choosing a clan admin without and with a linked account.
    ///
    /// Expected: Rejected until the user links, accepted afterwards
    #[tokio::test]
    async fn clan_admin_requires_linked_profile() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_config_tables()
            .with_bungie_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let fake = FakeDiscord::new();
        let service = ServerConfigService::new(db, &fake);

        assert!(matches!(
            service.set_clan_admin(1, 42).await,
            Err(AppError::BadRequest(_))
        ));

        test_utils::factory::create_bungie_profile(db, "42", "4611686018400000001").await?;
        let config = service.set_clan_admin(1, 42).await.unwrap();
        assert_eq!(config.clan_admin_id, Some(42));

        Ok(())
    }

    /// Tests the summary of an unconfigured guild.
    ///
    /// Expected: Every setting reported as not set, any channel accepted
    #[tokio::test]
    async fn describe_unconfigured_guild() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_config_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let fake = FakeDiscord::new();

        let text = ServerConfigService::new(db, &fake).describe(1).await.unwrap();

        assert!(text.contains("Event channels: Any channel"));
        assert!(text.contains("Clan admin: Not set"));

        Ok(())
    }
}
