//! Buttons of the attendance confirmation DM.

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};

use crate::{
    bot::{handler::Handler, reply},
    error::AppError,
    model::rsvp::RsvpStatus,
    scheduler::confirmation_reminder::ATTEND_NO_PREFIX,
    service::{event::EventService, rsvp::RsvpService},
    util::parse::id_after_prefix,
};

pub async fn confirm(ctx: &Context, component: &ComponentInteraction) {
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content("✅ Attendance confirmed, see you there!")
            .components(vec![]),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer attendance confirmation: {}", e);
    }
}

/// Switches the user to not going and refreshes the announcement.
pub async fn decline(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge attendance decline: {}", e);
        return;
    }

    let result = record_decline(handler, ctx, component).await;
    let edit = EditInteractionResponse::new()
        .content(reply::outcome(result))
        .components(vec![]);
    if let Err(e) = component.edit_response(&ctx.http, edit).await {
        tracing::error!("Failed to answer attendance decline: {}", e);
    }
}

async fn record_decline(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<String, AppError> {
    let event_id = id_after_prefix::<i32>(&component.data.custom_id, ATTEND_NO_PREFIX)
        .ok_or_else(|| AppError::BadRequest("Unknown event.".to_string()))?;
    let user_id = component.user.id.get();

    let (event, update) = RsvpService::new(&handler.db)
        .respond(event_id, user_id, RsvpStatus::NotGoing, handler.clock.now())
        .await?;

    if update.changed {
        let gateway = Handler::gateway(ctx);
        let service =
            EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);
        service
            .sync_temp_role(&event, user_id, RsvpStatus::NotGoing)
            .await;
        service.refresh_announcement(&event).await?;
    }

    Ok(format!(
        "Your answer for **'{}'** was updated to **Not going**.",
        event.title
    ))
}
