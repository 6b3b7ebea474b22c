use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::oauth_state::OauthState;

use entity::oauth_state::Column;

pub struct OauthStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OauthStateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        state: String,
        discord_id: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<OauthState, DbErr> {
        let entity = entity::oauth_state::ActiveModel {
            state: ActiveValue::Set(state),
            discord_id: ActiveValue::Set(discord_id.to_string()),
            expires_at: ActiveValue::Set(expires_at),
        }
        .insert(self.db)
        .await?;

        OauthState::from_entity(entity)
    }

    /// Removes a state and returns it when it was still valid.
    ///
    /// The row is deleted whether or not it expired, so a state can never be used twice.
    ///
    /// # Returns
    /// - `Ok(Some(OauthState))` - State existed and had not expired
    /// - `Ok(None)` - Unknown, already consumed or expired
    pub async fn consume(&self, state: &str, now: DateTime<Utc>) -> Result<Option<OauthState>, DbErr> {
        let Some(entity) = entity::prelude::OauthState::find_by_id(state.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let result = entity::prelude::OauthState::delete_by_id(state.to_string())
            .exec(self.db)
            .await?;

        // A concurrent consumer deleted it first
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let found = OauthState::from_entity(entity)?;
        if found.expires_at <= now {
            return Ok(None);
        }

        Ok(Some(found))
    }

    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::OauthState::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
