//! Announcement buttons.

use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::{
    bot::{handler::Handler, modal, reply},
    data::event::EventRepository,
    error::AppError,
    model::{
        event::EventStatus,
        permission::EventPermissionKind,
        rsvp::{Roster, RsvpStatus},
    },
    service::{
        event::{
            announcement::{parse_event_id, RSVP_GOING, RSVP_MAYBE, RSVP_NOT_GOING},
            input_from_event, EventService,
        },
        rsvp::RsvpService,
    },
    util::parse::id_after_prefix,
};

pub const DELETE_CONFIRM_PREFIX: &str = "event_delete_confirm_";
pub const DELETE_ABORT_PREFIX: &str = "event_delete_abort_";

/// Event id from the footer of the announcement the button is attached to, falling back
/// to the event stored against the message when the footer is missing or unreadable.
async fn announced_event_id(
    handler: &Handler,
    component: &ComponentInteraction,
) -> Result<i32, AppError> {
    if let Some(id) = footer_event_id(component) {
        return Ok(id);
    }

    EventRepository::new(&handler.db)
        .find_by_message_id(component.message.id.get())
        .await?
        .map(|event| event.id)
        .ok_or_else(|| AppError::NotFound("This announcement no longer matches an event.".to_string()))
}

fn footer_event_id(component: &ComponentInteraction) -> Option<i32> {
    component
        .message
        .embeds
        .first()
        .and_then(|embed| embed.footer.as_ref())
        .and_then(|footer| parse_event_id(&footer.text))
}

fn status_for(custom_id: &str) -> Option<RsvpStatus> {
    match custom_id {
        RSVP_GOING => Some(RsvpStatus::Going),
        RSVP_NOT_GOING => Some(RsvpStatus::NotGoing),
        RSVP_MAYBE => Some(RsvpStatus::Maybe),
        _ => None,
    }
}

fn status_label(status: RsvpStatus) -> &'static str {
    match status {
        RsvpStatus::Going => "Going",
        RsvpStatus::NotGoing => "Not going",
        RsvpStatus::Maybe => "Maybe",
        RsvpStatus::Waitlisted => "Waitlist",
    }
}

/// Reply to a self-service answer, telling going users whether they got a seat.
fn rsvp_reply(status: RsvpStatus, changed: bool, roster: &Roster, user_id: u64) -> String {
    if !changed {
        return format!("Your answer is already **{}**.", status_label(status));
    }

    if status == RsvpStatus::Going && !roster.confirmed.iter().any(|r| r.user_id == user_id) {
        return "⌛ The event is full, you are on the waitlist.".to_string();
    }

    format!("Your answer was updated to **{}**.", status_label(status))
}

pub async fn rsvp(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    if let Err(e) = component.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer RSVP button: {}", e);
        return;
    }

    let result = record_rsvp(handler, ctx, component).await;
    if let Err(e) = component.edit_response(&ctx.http, reply::edit(result)).await {
        tracing::error!("Failed to answer RSVP button: {}", e);
    }
}

async fn record_rsvp(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<String, AppError> {
    let event_id = announced_event_id(handler, component).await?;
    let status = status_for(&component.data.custom_id)
        .ok_or_else(|| AppError::BadRequest("Unknown answer.".to_string()))?;
    let user_id = component.user.id.get();

    let rsvps = RsvpService::new(&handler.db);
    let (event, update) = rsvps
        .respond(event_id, user_id, status, handler.clock.now())
        .await?;

    if update.changed {
        let gateway = Handler::gateway(ctx);
        let service =
            EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);
        service.sync_temp_role(&event, user_id, status).await;
        service.refresh_announcement(&event).await?;
    }

    let roster = rsvps.list(&event).await?;

    Ok(rsvp_reply(status, update.changed, &roster, user_id))
}

pub async fn open_edit_modal(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    let response = match editable_event_modal(handler, ctx, component).await {
        Ok(modal) => CreateInteractionResponse::Modal(modal),
        Err(e) => reply::ephemeral(reply::outcome(Err(e))),
    };

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer edit button: {}", e);
    }
}

async fn editable_event_modal(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<serenity::all::CreateModal, AppError> {
    let event_id = announced_event_id(handler, component).await?;
    let actor = reply::actor(&component.user, component.member.as_ref());

    let gateway = Handler::gateway(ctx);
    let event = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay)
        .authorize(event_id, &actor, EventPermissionKind::EditAnyEvent)
        .await?;
    if event.status != EventStatus::Active {
        return Err(AppError::BadRequest("Only active events can be edited.".to_string()));
    }

    Ok(modal::event_modal(
        format!("{}{}", modal::EVENT_EDIT_MODAL_PREFIX, event.id),
        "Edit event",
        &input_from_event(&event),
    ))
}

/// Asks for confirmation before cancelling.
pub async fn confirm_delete(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    let response = match deletable_event(handler, ctx, component).await {
        Ok((event_id, title)) => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(format!(
                    "Are you sure you want to cancel the event **'{}'**?",
                    title
                ))
                .ephemeral(true)
                .components(vec![CreateActionRow::Buttons(vec![
                    CreateButton::new(format!("{}{}", DELETE_CONFIRM_PREFIX, event_id))
                        .label("Yes, cancel it")
                        .style(ButtonStyle::Danger),
                    CreateButton::new(format!("{}{}", DELETE_ABORT_PREFIX, event_id))
                        .label("Keep it")
                        .style(ButtonStyle::Secondary),
                ])]),
        ),
        Err(e) => reply::ephemeral(reply::outcome(Err(e))),
    };

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer delete button: {}", e);
    }
}

async fn deletable_event(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(i32, String), AppError> {
    let event_id = announced_event_id(handler, component).await?;
    let actor = reply::actor(&component.user, component.member.as_ref());

    let gateway = Handler::gateway(ctx);
    let event = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay)
        .authorize(event_id, &actor, EventPermissionKind::DeleteAnyEvent)
        .await?;
    if event.status != EventStatus::Active {
        return Err(AppError::BadRequest("This event has already ended.".to_string()));
    }

    Ok((event.id, event.title))
}

pub async fn delete(handler: &Handler, ctx: &Context, component: &ComponentInteraction) {
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge delete confirmation: {}", e);
        return;
    }

    let result = cancel(handler, ctx, component).await;
    let edit = EditInteractionResponse::new()
        .content(reply::outcome(result))
        .components(vec![]);
    if let Err(e) = component.edit_response(&ctx.http, edit).await {
        tracing::error!("Failed to answer delete confirmation: {}", e);
    }
}

async fn cancel(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<String, AppError> {
    let event_id = id_after_prefix::<i32>(&component.data.custom_id, DELETE_CONFIRM_PREFIX)
        .ok_or_else(|| AppError::BadRequest("Unknown event.".to_string()))?;
    let actor = reply::actor(&component.user, component.member.as_ref());

    let gateway = Handler::gateway(ctx);
    let service = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);

    match service.cancel(event_id, &actor).await? {
        Some(event) => Ok(format!("🗑️ Event **'{}'** was cancelled.", event.title)),
        None => Ok("This event has already ended.".to_string()),
    }
}

pub async fn abort_delete(ctx: &Context, component: &ComponentInteraction) {
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content("Cancellation aborted.")
            .components(vec![]),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer delete abort: {}", e);
    }
}
