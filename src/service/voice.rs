//! Voice session tracking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::{
    data::voice_session::VoiceSessionRepository,
    error::AppError,
    model::voice_session::{CreateVoiceSessionParams, VoiceSession},
};

/// Sessions this short are not recorded.
const MIN_SESSION_SECS: i64 = 10;

/// A voice state update reduced to what the tracker needs.
#[derive(Debug, Clone, Copy)]
pub struct VoiceTransition {
    pub guild_id: u64,
    pub user_id: u64,
    pub is_bot: bool,
    pub was_connected: bool,
    pub is_connected: bool,
}

/// Join times of users currently in voice, keyed by guild and user.
///
/// Moving between channels keeps the original join time. Sessions open when the bot
/// starts are lost on restart.
#[derive(Default)]
pub struct VoiceTracker {
    sessions: Mutex<HashMap<(u64, u64), DateTime<Utc>>>,
}

impl VoiceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a voice state update and persists the session it closes, if any.
    ///
    /// # Returns
    /// - `Ok(Some(VoiceSession))` - A session longer than the minimum was stored
    /// - `Ok(None)` - Nothing to store
    pub async fn record(
        &self,
        db: &DatabaseConnection,
        transition: VoiceTransition,
        now: DateTime<Utc>,
    ) -> Result<Option<VoiceSession>, AppError> {
        if transition.is_bot {
            return Ok(None);
        }

        let key = (transition.guild_id, transition.user_id);
        let started_at = {
            let mut sessions = self.sessions.lock().await;
            match (transition.was_connected, transition.is_connected) {
                (false, true) => {
                    sessions.insert(key, now);
                    None
                }
                (true, false) => sessions.remove(&key),
                _ => None,
            }
        };

        let Some(started_at) = started_at else {
            return Ok(None);
        };
        if (now - started_at).num_seconds() <= MIN_SESSION_SECS {
            return Ok(None);
        }

        let session = VoiceSessionRepository::new(db)
            .create(CreateVoiceSessionParams {
                user_id: transition.user_id,
                guild_id: transition.guild_id,
                started_at,
                ended_at: now,
            })
            .await?;

        tracing::debug!(
            "Recorded {}s of voice for {} in guild {}",
            session.duration_seconds,
            session.user_id,
            session.guild_id
        );

        Ok(Some(session))
    }
}
