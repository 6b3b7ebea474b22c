use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::clan_invite::PendingClanInvite;

use entity::pending_clan_invite::Column;

/// Clan applications already announced in a mod channel.
pub struct PendingClanInviteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PendingClanInviteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn track(&self, invite: PendingClanInvite) -> Result<PendingClanInvite, DbErr> {
        let entity = entity::pending_clan_invite::ActiveModel {
            membership_id: ActiveValue::Set(invite.membership_id),
            membership_type: ActiveValue::Set(invite.membership_type),
            bungie_name: ActiveValue::Set(invite.bungie_name),
            guild_id: ActiveValue::Set(invite.guild_id.to_string()),
            message_id: ActiveValue::Set(invite.message_id.to_string()),
            expires_at: ActiveValue::Set(invite.expires_at),
        }
        .insert(self.db)
        .await?;

        PendingClanInvite::from_entity(entity)
    }

    pub async fn find(&self, membership_id: &str) -> Result<Option<PendingClanInvite>, DbErr> {
        entity::prelude::PendingClanInvite::find_by_id(membership_id.to_string())
            .one(self.db)
            .await?
            .map(PendingClanInvite::from_entity)
            .transpose()
    }

    pub async fn untrack(&self, membership_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::PendingClanInvite::delete_by_id(membership_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Drops tracking rows whose expiry has passed so the applicant can be announced
    /// again.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::PendingClanInvite::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
