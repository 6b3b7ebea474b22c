use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::util::parse::parse_snowflake;

use entity::designated_event_channel::Column;

/// Channels where events may be created. A guild without any allows every channel.
pub struct DesignatedChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DesignatedChannelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Designates a channel. Designating it twice is a no-op.
    pub async fn add(&self, guild_id: u64, channel_id: u64) -> Result<(), DbErr> {
        entity::prelude::DesignatedEventChannel::insert(
            entity::designated_event_channel::ActiveModel {
                channel_id: ActiveValue::Set(channel_id.to_string()),
                guild_id: ActiveValue::Set(guild_id.to_string()),
            },
        )
        .on_conflict(
            OnConflict::column(Column::ChannelId)
                .update_column(Column::GuildId)
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// # Returns
    /// - `Ok(true)` - The channel was designated and no longer is
    /// - `Ok(false)` - The channel was not designated
    pub async fn remove(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::DesignatedEventChannel::delete_by_id(channel_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<u64>, DbErr> {
        entity::prelude::DesignatedEventChannel::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| parse_snowflake(&row.channel_id, "channel_id"))
            .collect()
    }
}
