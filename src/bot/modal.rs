//! Event create and edit modals.

use serenity::all::{
    ActionRow, ActionRowComponent, Context, CreateActionRow, CreateInputText, CreateModal,
    InputTextStyle, ModalInteraction,
};

use crate::{
    error::AppError,
    service::event::{EventInput, EventService},
    util::parse::id_after_prefix,
};

use super::{handler::Handler, reply};

pub const EVENT_CREATE_MODAL: &str = "event_create_modal";
pub const EVENT_EDIT_MODAL_PREFIX: &str = "event_edit_modal_";

const FIELD_TITLE: &str = "title";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_TIME: &str = "time";
const FIELD_CAPACITY: &str = "capacity";

/// Modal with the four event fields, prefilled from `input`.
pub fn event_modal(custom_id: impl Into<String>, heading: &str, input: &EventInput) -> CreateModal {
    let fields = [
        CreateInputText::new(InputTextStyle::Short, "Title", FIELD_TITLE)
            .placeholder("Vault of Glass - Master")
            .max_length(100)
            .required(true),
        CreateInputText::new(InputTextStyle::Paragraph, "Description", FIELD_DESCRIPTION)
            .max_length(1000)
            .required(false),
        CreateInputText::new(InputTextStyle::Short, "Date and time", FIELD_TIME)
            .placeholder("21:00, 25/12 21:00 or 25/12/2026 21:00")
            .required(true),
        CreateInputText::new(InputTextStyle::Short, "Capacity", FIELD_CAPACITY)
            .placeholder("Blank uses the activity default")
            .max_length(3)
            .required(false),
    ];
    let values = [
        &input.title,
        &input.description,
        &input.time,
        &input.capacity,
    ];

    let rows = fields
        .into_iter()
        .zip(values)
        .map(|(field, value)| {
            // Discord rejects an empty prefill
            let field = if value.is_empty() {
                field
            } else {
                field.value(value.clone())
            };
            CreateActionRow::InputText(field)
        })
        .collect();

    CreateModal::new(custom_id, heading).components(rows)
}

/// Reads the submitted fields back into an `EventInput`. Missing fields stay empty.
pub fn event_input(rows: &[ActionRow]) -> EventInput {
    let mut input = EventInput::default();

    for component in rows.iter().flat_map(|row| &row.components) {
        let ActionRowComponent::InputText(text) = component else {
            continue;
        };
        let value = text.value.clone().unwrap_or_default();
        match text.custom_id.as_str() {
            FIELD_TITLE => input.title = value,
            FIELD_DESCRIPTION => input.description = value,
            FIELD_TIME => input.time = value,
            FIELD_CAPACITY => input.capacity = value,
            _ => {}
        }
    }

    input
}

/// Handles a submitted event modal.
pub async fn handle_modal(handler: &Handler, ctx: Context, modal: ModalInteraction) {
    let custom_id = modal.data.custom_id.as_str();
    if custom_id != EVENT_CREATE_MODAL && !custom_id.starts_with(EVENT_EDIT_MODAL_PREFIX) {
        tracing::warn!("Unknown modal {}", custom_id);
        return;
    }

    if let Err(e) = modal.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer modal {}: {}", custom_id, e);
        return;
    }

    let result = submit(handler, &ctx, &modal).await;
    if let Err(e) = modal.edit_response(&ctx.http, reply::edit(result)).await {
        tracing::error!("Failed to answer modal {}: {}", custom_id, e);
    }
}

async fn submit(handler: &Handler, ctx: &Context, modal: &ModalInteraction) -> Result<String, AppError> {
    let guild_id = modal.guild_id.ok_or_else(|| {
        AppError::BadRequest("Events can only be managed inside a server.".to_string())
    })?;
    let input = event_input(&modal.data.components);
    let actor = reply::actor(&modal.user, modal.member.as_ref());

    let gateway = Handler::gateway(ctx);
    let service = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);

    if modal.data.custom_id == EVENT_CREATE_MODAL {
        let event = service
            .create(guild_id.get(), modal.channel_id.get(), &actor, &input)
            .await?;

        return Ok(format!(
            "✅ Event **{}** created with ID {}.",
            event.title, event.id
        ));
    }

    let event_id = id_after_prefix::<i32>(&modal.data.custom_id, EVENT_EDIT_MODAL_PREFIX)
        .ok_or_else(|| AppError::BadRequest("This form no longer matches an event.".to_string()))?;
    let event = service.edit(event_id, &actor, &input).await?;

    Ok(format!("✏️ Event **{}** updated.", event.title))
}
