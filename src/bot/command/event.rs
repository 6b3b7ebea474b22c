//! `/event` subcommands.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, GuildId,
};

use crate::{
    bot::{handler::Handler, modal, reply},
    error::AppError,
    model::rsvp::RsvpStatus,
    service::{
        event::{
            listing::{build_listing, LISTING_HEADER},
            EventInput, EventService,
        },
        permission::PermissionService,
        rsvp::{RsvpAction, RsvpService},
    },
};

use super::{deferred, options::Options};

pub const NAME: &str = "event";

pub fn definition() -> CreateCommand {
    let event_id = || {
        CreateCommandOption::new(CommandOptionType::Integer, "id", "Event ID, shown in the footer")
            .min_int_value(1)
            .required(true)
    };

    CreateCommand::new(NAME)
        .description("Create and manage clan events")
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "create",
            "Create a new event",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "Show upcoming events",
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "cancel", "Cancel an event")
                .add_sub_option(event_id()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "rsvp",
                "Set or clear another member's RSVP",
            )
            .add_sub_option(event_id())
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "action", "New answer")
                    .required(true)
                    .add_string_choice("Going", RsvpStatus::Going.as_str())
                    .add_string_choice("Waitlist", RsvpStatus::Waitlisted.as_str())
                    .add_string_choice("Maybe", RsvpStatus::Maybe.as_str())
                    .add_string_choice("Not going", RsvpStatus::NotGoing.as_str())
                    .add_string_choice("Remove", "remove"),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Member to update")
                    .required(true),
            ),
        )
}

pub async fn handle(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    let options = Options::new(&command.data.options);
    let Some((subcommand, args)) = options.subcommand() else {
        return;
    };

    match subcommand {
        "create" => open_create_modal(handler, ctx, command).await,
        "list" => deferred(ctx, command, list(handler, command)).await,
        "cancel" => deferred(ctx, command, cancel(handler, ctx, command, args)).await,
        "rsvp" => deferred(ctx, command, rsvp(handler, ctx, command, args)).await,
        other => tracing::warn!("Unknown subcommand /event {}", other),
    }
}

/// Checks creation rights up front so nobody fills in a form that will be rejected. The
/// submission is checked again.
async fn open_create_modal(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    let response = match create_precheck(handler, command).await {
        Ok(()) => CreateInteractionResponse::Modal(modal::event_modal(
            modal::EVENT_CREATE_MODAL,
            "Create event",
            &EventInput::default(),
        )),
        Err(e) => reply::ephemeral(reply::outcome(Err(e))),
    };

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to answer /event create: {}", e);
    }
}

async fn create_precheck(handler: &Handler, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let actor = reply::actor(&command.user, command.member.as_ref());
    let permissions = PermissionService::new(&handler.db);

    if !permissions.can_create(guild_id, &actor).await? {
        return Err(AppError::Forbidden(
            "You don't have permission to create events.".to_string(),
        ));
    }
    if !permissions
        .is_event_channel(guild_id, command.channel_id.get())
        .await?
    {
        return Err(AppError::Forbidden(
            "Events can only be created in the designated event channels.".to_string(),
        ));
    }

    Ok(())
}

async fn list(handler: &Handler, command: &CommandInteraction) -> Result<String, AppError> {
    let guild_id = require_guild(command.guild_id)?;

    match build_listing(&handler.db, guild_id, handler.clock.now()).await? {
        Some(listing) => Ok(format!("{}\n{}", LISTING_HEADER, listing)),
        None => Ok("No upcoming events.".to_string()),
    }
}

async fn cancel(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    args: Options<'_>,
) -> Result<String, AppError> {
    require_guild(command.guild_id)?;
    let event_id = event_id(args)?;
    let actor = reply::actor(&command.user, command.member.as_ref());

    let gateway = Handler::gateway(ctx);
    let service = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);

    match service.cancel(event_id, &actor).await? {
        Some(event) => Ok(format!("🗑️ Event **{}** was cancelled.", event.title)),
        None => Ok("This event has already ended.".to_string()),
    }
}

async fn rsvp(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
    args: Options<'_>,
) -> Result<String, AppError> {
    require_guild(command.guild_id)?;
    let event_id = event_id(args)?;
    let action = args
        .string("action")
        .and_then(RsvpAction::parse)
        .ok_or_else(|| AppError::BadRequest("Unknown RSVP action.".to_string()))?;
    let target = args
        .user("user")
        .ok_or_else(|| AppError::BadRequest("Pick a member to update.".to_string()))?;
    let actor = reply::actor(&command.user, command.member.as_ref());

    let event = RsvpService::new(&handler.db)
        .manage(event_id, &actor, target, action, handler.clock.now())
        .await?;

    let gateway = Handler::gateway(ctx);
    let service = EventService::new(&handler.db, &gateway, handler.clock.as_ref(), handler.dm_delay);
    let status = match action {
        RsvpAction::Set(status) => status,
        RsvpAction::Remove => RsvpStatus::NotGoing,
    };
    service.sync_temp_role(&event, target, status).await;
    service.refresh_announcement(&event).await?;

    Ok(match action {
        RsvpAction::Set(status) => format!(
            "✅ <@{}> is now **{}** for **{}**.",
            target,
            status.as_str(),
            event.title
        ),
        RsvpAction::Remove => format!("🗑️ Removed <@{}> from **{}**.", target, event.title),
    })
}

fn event_id(args: Options<'_>) -> Result<i32, AppError> {
    args.integer("id")
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Provide a valid event ID.".to_string()))
}

fn require_guild(guild_id: Option<GuildId>) -> Result<u64, AppError> {
    guild_id
        .map(|id| id.get())
        .ok_or_else(|| AppError::BadRequest("This command only works inside a server.".to_string()))
}
