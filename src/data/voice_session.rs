use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::voice_session::{CreateVoiceSessionParams, VoiceSession, VoiceTotal};

use entity::voice_session::Column;

pub struct VoiceSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoiceSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a finished session. The duration is derived from the two timestamps.
    pub async fn create(&self, params: CreateVoiceSessionParams) -> Result<VoiceSession, DbErr> {
        let duration = (params.ended_at - params.started_at).num_seconds().max(0);

        let entity = entity::voice_session::ActiveModel {
            user_id: ActiveValue::Set(params.user_id.to_string()),
            guild_id: ActiveValue::Set(params.guild_id.to_string()),
            started_at: ActiveValue::Set(params.started_at),
            ended_at: ActiveValue::Set(params.ended_at),
            duration_seconds: ActiveValue::Set(duration),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        VoiceSession::from_entity(entity)
    }

    /// Sessions of a guild that started at or after `since`.
    pub async fn get_since(
        &self,
        guild_id: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<VoiceSession>, DbErr> {
        entity::prelude::VoiceSession::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::StartedAt.gte(since))
            .all(self.db)
            .await?
            .into_iter()
            .map(VoiceSession::from_entity)
            .collect()
    }

    /// Per-user voice totals since `since`, highest first. Ties keep the lower user id
    /// first.
    pub async fn get_totals_since(
        &self,
        guild_id: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<VoiceTotal>, DbErr> {
        let mut totals: HashMap<u64, i64> = HashMap::new();
        for session in self.get_since(guild_id, since).await? {
            *totals.entry(session.user_id).or_default() += session.duration_seconds;
        }

        let mut totals: Vec<VoiceTotal> = totals
            .into_iter()
            .map(|(user_id, seconds)| VoiceTotal { user_id, seconds })
            .collect();
        totals.sort_by(|a, b| b.seconds.cmp(&a.seconds).then(a.user_id.cmp(&b.user_id)));

        Ok(totals)
    }
}
