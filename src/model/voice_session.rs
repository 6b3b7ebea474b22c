use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

/// A finished stay in voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSession {
    pub id: i32,
    pub user_id: u64,
    pub guild_id: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
}

impl VoiceSession {
    pub fn from_entity(entity: entity::voice_session::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            started_at: entity.started_at,
            ended_at: entity.ended_at,
            duration_seconds: entity.duration_seconds,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateVoiceSessionParams {
    pub user_id: u64,
    pub guild_id: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Summed voice time of one user over a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTotal {
    pub user_id: u64,
    pub seconds: i64,
}

impl VoiceTotal {
    pub fn hours(&self) -> f64 {
        self.seconds as f64 / 3600.0
    }
}
