//! Server configuration factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for `server_config` rows. Every optional column defaults to unset.
pub struct ServerConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    digest_channel_id: Option<String>,
    ranking_channel_id: Option<String>,
    mod_channel_id: Option<String>,
    penalty_role_id: Option<String>,
    clan_role_id: Option<String>,
    clan_admin_id: Option<String>,
}

impl<'a> ServerConfigFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            digest_channel_id: None,
            ranking_channel_id: None,
            mod_channel_id: None,
            penalty_role_id: None,
            clan_role_id: None,
            clan_admin_id: None,
        }
    }

    pub fn digest_channel_id(mut self, id: impl Into<String>) -> Self {
        self.digest_channel_id = Some(id.into());
        self
    }

    pub fn ranking_channel_id(mut self, id: impl Into<String>) -> Self {
        self.ranking_channel_id = Some(id.into());
        self
    }

    pub fn mod_channel_id(mut self, id: impl Into<String>) -> Self {
        self.mod_channel_id = Some(id.into());
        self
    }

    pub fn penalty_role_id(mut self, id: impl Into<String>) -> Self {
        self.penalty_role_id = Some(id.into());
        self
    }

    pub fn clan_role_id(mut self, id: impl Into<String>) -> Self {
        self.clan_role_id = Some(id.into());
        self
    }

    pub fn clan_admin_id(mut self, id: impl Into<String>) -> Self {
        self.clan_admin_id = Some(id.into());
        self
    }

    /// Inserts the configuration row.
    pub async fn build(self) -> Result<entity::server_config::Model, DbErr> {
        entity::server_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            digest_channel_id: ActiveValue::Set(self.digest_channel_id),
            ranking_channel_id: ActiveValue::Set(self.ranking_channel_id),
            mod_channel_id: ActiveValue::Set(self.mod_channel_id),
            penalty_role_id: ActiveValue::Set(self.penalty_role_id),
            clan_role_id: ActiveValue::Set(self.clan_role_id),
            clan_admin_id: ActiveValue::Set(self.clan_admin_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an empty configuration row for the guild.
pub async fn create_server_config(
    db: &DatabaseConnection,
    guild_id: impl Into<String>,
) -> Result<entity::server_config::Model, DbErr> {
    ServerConfigFactory::new(db, guild_id).build().await
}
