use serenity::all::VoiceState;

use crate::service::voice::VoiceTransition;

use super::Handler;

/// Feeds a voice state update into the session tracker.
///
/// Only joining from no channel and leaving every channel matter; moves and mute changes
/// arrive here too and are ignored by the tracker.
pub async fn handle_voice_state_update(handler: &Handler, old: Option<VoiceState>, new: VoiceState) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let transition = VoiceTransition {
        guild_id: guild_id.get(),
        user_id: new.user_id.get(),
        is_bot: new.member.as_ref().is_some_and(|m| m.user.bot),
        was_connected: old.as_ref().and_then(|s| s.channel_id).is_some(),
        is_connected: new.channel_id.is_some(),
    };

    match handler
        .voice
        .record(&handler.db, transition, handler.clock.now())
        .await
    {
        Ok(Some(session)) => tracing::debug!(
            "Recorded {}s voice session of user {} in guild {}",
            session.duration_seconds,
            session.user_id,
            session.guild_id
        ),
        Ok(None) => {}
        Err(e) => tracing::error!(
            "Failed to record voice session of user {}: {}",
            transition.user_id,
            e
        ),
    }
}
