//! Removes announcements of ended events once their grace period is over.

use crate::{data::event::EventRepository, error::AppError, model::event::Event};

use super::JobContext;

pub async fn run(ctx: &JobContext) -> Result<(), AppError> {
    let now = ctx.clock.now();
    let repo = EventRepository::new(&ctx.db);

    for event in repo.get_due_message_deletions(now).await? {
        if let Err(e) = delete_announcement(ctx, &event).await {
            tracing::error!(
                "Failed to delete announcement of event {}: {}",
                event.id,
                e
            );
            continue;
        }

        if let Err(e) = repo.mark_message_deleted(event.id, event.status).await {
            tracing::error!(
                "Failed to mark announcement of event {} deleted: {}",
                event.id,
                e
            );
        }
    }

    Ok(())
}

/// A message that is already gone, or that the bot may no longer touch, counts as
/// deleted.
async fn delete_announcement(ctx: &JobContext, event: &Event) -> Result<(), AppError> {
    let Some(message_id) = event.message_id else {
        return Ok(());
    };

    match ctx.discord.delete_message(event.channel_id, message_id).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_missing_or_forbidden() => {
            tracing::debug!("Announcement of event {} already gone: {}", event.id, e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
