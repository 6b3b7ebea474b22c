use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::server_config::ServerConfig;

use entity::server_config::Column;

pub struct ServerConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the stored configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(ServerConfig))` - Guild has been configured
    /// - `Ok(None)` - No row for the guild
    pub async fn get(&self, guild_id: u64) -> Result<Option<ServerConfig>, DbErr> {
        entity::prelude::ServerConfig::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(ServerConfig::from_entity)
            .transpose()
    }

    /// Gets the configuration, or an empty one when the guild was never configured.
    pub async fn get_or_default(&self, guild_id: u64) -> Result<ServerConfig, DbErr> {
        Ok(self
            .get(guild_id)
            .await?
            .unwrap_or_else(|| ServerConfig::empty(guild_id)))
    }

    /// Writes every column of the configuration, inserting the row when missing.
    pub async fn upsert(&self, config: &ServerConfig) -> Result<ServerConfig, DbErr> {
        let opt = |v: Option<u64>| ActiveValue::Set(v.map(|id| id.to_string()));

        let entity = entity::prelude::ServerConfig::insert(entity::server_config::ActiveModel {
            guild_id: ActiveValue::Set(config.guild_id.to_string()),
            digest_channel_id: opt(config.digest_channel_id),
            ranking_channel_id: opt(config.ranking_channel_id),
            mod_channel_id: opt(config.mod_channel_id),
            penalty_role_id: opt(config.penalty_role_id),
            clan_role_id: opt(config.clan_role_id),
            clan_admin_id: opt(config.clan_admin_id),
        })
        .on_conflict(
            OnConflict::column(Column::GuildId)
                .update_columns([
                    Column::DigestChannelId,
                    Column::RankingChannelId,
                    Column::ModChannelId,
                    Column::PenaltyRoleId,
                    Column::ClanRoleId,
                    Column::ClanAdminId,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        ServerConfig::from_entity(entity)
    }

    /// Configurations of guilds with a digest channel set.
    pub async fn get_with_digest_channel(&self) -> Result<Vec<ServerConfig>, DbErr> {
        self.get_where(Column::DigestChannelId).await
    }

    /// Configurations of guilds with a ranking channel set.
    pub async fn get_with_ranking_channel(&self) -> Result<Vec<ServerConfig>, DbErr> {
        self.get_where(Column::RankingChannelId).await
    }

    /// Configurations of guilds with a mod channel set.
    pub async fn get_with_mod_channel(&self) -> Result<Vec<ServerConfig>, DbErr> {
        self.get_where(Column::ModChannelId).await
    }

    /// Configurations of guilds with a clan admin set.
    pub async fn get_with_clan_admin(&self) -> Result<Vec<ServerConfig>, DbErr> {
        self.get_where(Column::ClanAdminId).await
    }

    async fn get_where(&self, column: Column) -> Result<Vec<ServerConfig>, DbErr> {
        entity::prelude::ServerConfig::find()
            .filter(column.is_not_null())
            .all(self.db)
            .await?
            .into_iter()
            .map(ServerConfig::from_entity)
            .collect()
    }
}
