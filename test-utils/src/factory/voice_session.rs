//! Voice session factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a finished voice session that started at `started_at` and lasted
/// `duration_seconds`.
///
/// # Returns
/// - `Ok(entity::voice_session::Model)` - Created session
/// - `Err(DbErr)` - Database error during insert
pub async fn create_voice_session(
    db: &DatabaseConnection,
    guild_id: impl Into<String>,
    user_id: impl Into<String>,
    started_at: DateTime<Utc>,
    duration_seconds: i64,
) -> Result<entity::voice_session::Model, DbErr> {
    entity::voice_session::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(user_id.into()),
        guild_id: ActiveValue::Set(guild_id.into()),
        started_at: ActiveValue::Set(started_at),
        ended_at: ActiveValue::Set(started_at + Duration::seconds(duration_seconds)),
        duration_seconds: ActiveValue::Set(duration_seconds),
    }
    .insert(db)
    .await
}
