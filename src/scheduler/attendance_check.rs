//! Records who showed up, half an hour into an event.

use chrono::Duration;

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{
        event::Event,
        rsvp::{AttendanceStatus, Roster},
    },
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let repo = EventRepository::new(&ctx.db);
    let events = repo
        .get_due_attendance_checks(now - Duration::minutes(40), now - Duration::minutes(30))
        .await?;

    for event in events {
        if let Err(e) = check(ctx, &event).await {
            tracing::error!("Failed to record attendance of event {}: {}", event.id, e);
        }
        if let Err(e) = repo.mark_attendance_checked(event.id).await {
            tracing::error!("Failed to mark event {} checked: {}", event.id, e);
        }
    }

    Ok(())
}

/// Marks going users attended when they are in the event's voice channel.
///
/// When the event has no channel, or its channel no longer exists, the creator's current
/// channel is used. When no channel can be found nothing is recorded.
async fn check(ctx: &JobContext, event: &Event) -> Result<(), AppError> {
    let mut present = None;
    if let Some(channel_id) = event.voice_channel_id {
        present = ctx
            .discord
            .voice_channel_members(event.guild_id, channel_id)
            .await?;
        if present.is_none() {
            tracing::debug!(
                "Voice channel {} of event {} no longer exists",
                channel_id,
                event.id
            );
        }
    }
    if present.is_none() {
        if let Some(channel_id) = ctx
            .discord
            .member_voice_channel(event.guild_id, event.creator_id)
            .await?
        {
            present = ctx
                .discord
                .voice_channel_members(event.guild_id, channel_id)
                .await?;
        }
    }
    let Some(present) = present else {
        tracing::debug!("No voice channel to check for event {}", event.id);
        return Ok(());
    };

    let rsvp_repo = RsvpRepository::new(&ctx.db);
    let going = Roster::new(rsvp_repo.get_by_event(event.id).await?, event.capacity())
        .going_user_ids();

    for user_id in &going {
        let attendance = if present.contains(user_id) {
            AttendanceStatus::Attended
        } else {
            AttendanceStatus::Absent
        };
        rsvp_repo
            .set_attendance(event.id, *user_id, attendance)
            .await?;
    }

    tracing::info!(
        "Recorded attendance of event {}: {}/{} present",
        event.id,
        going.iter().filter(|u| present.contains(u)).count(),
        going.len()
    );

    Ok(())
}
