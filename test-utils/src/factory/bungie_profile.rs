//! Linked Bungie profile factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for `bungie_profile` rows.
///
/// Defaults to a unique membership id, membership type 3 and a token valid for one hour.
pub struct BungieProfileFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    membership_id: String,
    membership_type: i32,
    bungie_name: String,
    access_token: String,
    refresh_token: String,
    token_expires_at: DateTime<Utc>,
}

impl<'a> BungieProfileFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, discord_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: discord_id.into(),
            membership_id: format!("4611686018{}", id),
            membership_type: 3,
            bungie_name: format!("Guardian#{:04}", id % 10_000),
            access_token: format!("access-{}", id),
            refresh_token: format!("refresh-{}", id),
            token_expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn membership_id(mut self, membership_id: impl Into<String>) -> Self {
        self.membership_id = membership_id.into();
        self
    }

    pub fn membership_type(mut self, membership_type: i32) -> Self {
        self.membership_type = membership_type;
        self
    }

    pub fn bungie_name(mut self, name: impl Into<String>) -> Self {
        self.bungie_name = name.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    pub fn token_expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.token_expires_at = at;
        self
    }

    /// Inserts the profile row.
    pub async fn build(self) -> Result<entity::bungie_profile::Model, DbErr> {
        entity::bungie_profile::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            membership_id: ActiveValue::Set(self.membership_id),
            membership_type: ActiveValue::Set(self.membership_type),
            bungie_name: ActiveValue::Set(self.bungie_name),
            access_token: ActiveValue::Set(self.access_token),
            refresh_token: ActiveValue::Set(self.refresh_token),
            token_expires_at: ActiveValue::Set(self.token_expires_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a linked profile for the Discord user with a given membership id.
pub async fn create_bungie_profile(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
    membership_id: impl Into<String>,
) -> Result<entity::bungie_profile::Model, DbErr> {
    BungieProfileFactory::new(db, discord_id)
        .membership_id(membership_id)
        .build()
        .await
}
