//! DMs going users about 15 minutes before their event.

use chrono::Duration;
use serenity::all::CreateMessage;

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{event::Event, rsvp::Roster},
};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let events = EventRepository::new(&ctx.db)
        .get_due_reminders(now + Duration::minutes(14), now + Duration::minutes(16))
        .await?;

    for event in events {
        if let Err(e) = remind(ctx, &event).await {
            tracing::error!("Failed to send reminders for event {}: {}", event.id, e);
        }
    }

    Ok(())
}

/// Claims the reminder flag before sending, so an overlapping run skips the event.
async fn remind(ctx: &JobContext, event: &Event) -> Result<(), AppError> {
    if !EventRepository::new(&ctx.db)
        .mark_reminder_sent(event.id)
        .await?
    {
        return Ok(());
    }

    let rsvps = RsvpRepository::new(&ctx.db).get_by_event(event.id).await?;
    let going = Roster::new(rsvps, event.capacity()).going_user_ids();
    let text = reminder_text(event);

    for (i, user_id) in going.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(ctx.reminder_delay()).await;
        }
        if let Err(e) = ctx
            .discord
            .send_dm(*user_id, CreateMessage::new().content(&text))
            .await
        {
            tracing::debug!("Could not remind {} of event {}: {}", user_id, event.id, e);
        }
    }

    tracing::info!("Sent {} reminders for event {}", going.len(), event.id);

    Ok(())
}

fn reminder_text(event: &Event) -> String {
    let mut text = format!(
        "🔔 **Reminder:** **'{}'** starts in about 15 minutes!",
        event.title
    );
    if let Some(link) = event.message_link() {
        text.push('\n');
        text.push_str(&link);
    }
    if let Some(channel_id) = event.voice_channel_id {
        text.push_str(&format!("\nVoice channel: <#{}>", channel_id));
    }

    text
}
