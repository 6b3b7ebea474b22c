//! Asks going users an hour ahead whether they are still coming.

use chrono::Duration;
use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, CreateMessage};

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{event::Event, rsvp::Roster},
};

use super::JobContext;

pub const ATTEND_YES_PREFIX: &str = "attend_yes_";
pub const ATTEND_NO_PREFIX: &str = "attend_no_";

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let events = EventRepository::new(&ctx.db)
        .get_due_confirmations(now + Duration::minutes(59), now + Duration::minutes(61))
        .await?;

    for event in events {
        if let Err(e) = prompt(ctx, &event).await {
            tracing::error!(
                "Failed to send attendance prompts for event {}: {}",
                event.id,
                e
            );
        }
    }

    Ok(())
}

async fn prompt(ctx: &JobContext, event: &Event) -> Result<(), AppError> {
    if !EventRepository::new(&ctx.db)
        .mark_confirmation_sent(event.id)
        .await?
    {
        return Ok(());
    }

    let rsvps = RsvpRepository::new(&ctx.db).get_by_event(event.id).await?;
    let recipients: Vec<u64> = Roster::new(rsvps, event.capacity())
        .going_user_ids()
        .into_iter()
        .filter(|user_id| *user_id != event.creator_id)
        .collect();

    for (i, user_id) in recipients.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(ctx.reminder_delay()).await;
        }
        if let Err(e) = ctx.discord.send_dm(*user_id, prompt_message(event)).await {
            tracing::debug!(
                "Could not ask {} about event {}: {}",
                user_id,
                event.id,
                e
            );
        }
    }

    Ok(())
}

fn prompt_message(event: &Event) -> CreateMessage {
    CreateMessage::new()
        .content(format!(
            "⏳ Reminder: **'{}'** starts in ~1 hour. Are you still coming?",
            event.title
        ))
        .components(vec![CreateActionRow::Buttons(vec![
            CreateButton::new(format!("{}{}", ATTEND_YES_PREFIX, event.id))
                .label("Yes, I'm coming")
                .style(ButtonStyle::Success),
            CreateButton::new(format!("{}{}", ATTEND_NO_PREFIX, event.id))
                .label("Can't make it")
                .style(ButtonStyle::Danger),
        ])])
}
