use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::bungie_profile::{BungieProfile, LinkedAccount};

use entity::bungie_profile::Column;

pub struct BungieProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BungieProfileRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links a Bungie account to a Discord user, replacing any previous link.
    pub async fn upsert(
        &self,
        discord_id: u64,
        account: LinkedAccount,
    ) -> Result<BungieProfile, DbErr> {
        let entity = entity::prelude::BungieProfile::insert(entity::bungie_profile::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            membership_id: ActiveValue::Set(account.membership_id),
            membership_type: ActiveValue::Set(account.membership_type),
            bungie_name: ActiveValue::Set(account.bungie_name),
            access_token: ActiveValue::Set(account.access_token),
            refresh_token: ActiveValue::Set(account.refresh_token),
            token_expires_at: ActiveValue::Set(account.token_expires_at),
        })
        .on_conflict(
            OnConflict::column(Column::DiscordId)
                .update_columns([
                    Column::MembershipId,
                    Column::MembershipType,
                    Column::BungieName,
                    Column::AccessToken,
                    Column::RefreshToken,
                    Column::TokenExpiresAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        BungieProfile::from_entity(entity)
    }

    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<BungieProfile>, DbErr> {
        entity::prelude::BungieProfile::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?
            .map(BungieProfile::from_entity)
            .transpose()
    }

    pub async fn find_by_membership_id(
        &self,
        membership_id: &str,
    ) -> Result<Option<BungieProfile>, DbErr> {
        entity::prelude::BungieProfile::find()
            .filter(Column::MembershipId.eq(membership_id))
            .one(self.db)
            .await?
            .map(BungieProfile::from_entity)
            .transpose()
    }

    pub async fn get_all(&self) -> Result<Vec<BungieProfile>, DbErr> {
        entity::prelude::BungieProfile::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(BungieProfile::from_entity)
            .collect()
    }

    /// Stores refreshed OAuth tokens.
    pub async fn update_tokens(
        &self,
        discord_id: u64,
        access_token: String,
        refresh_token: String,
        token_expires_at: DateTime<Utc>,
    ) -> Result<Option<BungieProfile>, DbErr> {
        let Some(existing) = entity::prelude::BungieProfile::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::bungie_profile::ActiveModel = existing.into();
        active.access_token = ActiveValue::Set(access_token);
        active.refresh_token = ActiveValue::Set(refresh_token);
        active.token_expires_at = ActiveValue::Set(token_expires_at);

        let updated = active.update(self.db).await?;

        BungieProfile::from_entity(updated).map(Some)
    }
}
