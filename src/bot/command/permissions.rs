//! `/permissions`, role grants for event management.

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Permissions,
};

use crate::{
    bot::{handler::Handler, reply},
    data::event_permission::EventPermissionRepository,
    error::AppError,
    model::permission::EventPermissionKind,
    service::permission::PermissionService,
};

use super::options::Options;

pub const NAME: &str = "permissions";

fn grant_options(option: CreateCommandOption) -> CreateCommandOption {
    let mut permission =
        CreateCommandOption::new(CommandOptionType::String, "permission", "Permission")
            .required(true);
    for kind in EventPermissionKind::ALL {
        permission = permission.add_string_choice(kind.label(), kind.as_str());
    }

    option
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Role, "role", "Role").required(true),
        )
        .add_sub_option(permission)
}

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Manage who may create and manage events")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(grant_options(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "grant",
            "Grant an event permission to a role",
        )))
        .add_option(grant_options(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "revoke",
            "Revoke an event permission from a role",
        )))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "Show the granted event permissions",
        ))
}

pub async fn run(handler: &Handler, command: &CommandInteraction) -> Result<String, AppError> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| {
            AppError::BadRequest("This command only works inside a server.".to_string())
        })?
        .get();

    let actor = reply::actor(&command.user, command.member.as_ref());
    if !actor.is_administrator {
        return Err(AppError::Forbidden(
            "Only administrators can manage event permissions.".to_string(),
        ));
    }

    let options = Options::new(&command.data.options);
    let Some((subcommand, args)) = options.subcommand() else {
        return Err(AppError::BadRequest("Choose grant, revoke or list.".to_string()));
    };

    if subcommand == "list" {
        return PermissionService::new(&handler.db)
            .describe_grants(guild_id)
            .await;
    }

    let role_id = args
        .role("role")
        .ok_or_else(|| AppError::BadRequest("Pick a role.".to_string()))?;
    let permission = args
        .string("permission")
        .and_then(EventPermissionKind::parse)
        .ok_or_else(|| AppError::BadRequest("Unknown permission.".to_string()))?;
    let repo = EventPermissionRepository::new(&handler.db);

    match subcommand {
        "grant" => {
            if repo.grant(guild_id, role_id, permission).await? {
                tracing::info!(
                    "User {} granted {} to role {} in guild {}",
                    actor.user_id,
                    permission.as_str(),
                    role_id,
                    guild_id
                );
                Ok(format!(
                    "✅ <@&{}> can now: **{}**.",
                    role_id,
                    permission.label()
                ))
            } else {
                Ok(format!(
                    "<@&{}> already has **{}**.",
                    role_id,
                    permission.label()
                ))
            }
        }
        "revoke" => {
            if repo.revoke(guild_id, role_id, permission).await? {
                tracing::info!(
                    "User {} revoked {} from role {} in guild {}",
                    actor.user_id,
                    permission.as_str(),
                    role_id,
                    guild_id
                );
                Ok(format!(
                    "🗑️ <@&{}> no longer has **{}**.",
                    role_id,
                    permission.label()
                ))
            } else {
                Ok(format!(
                    "<@&{}> did not have **{}**.",
                    role_id,
                    permission.label()
                ))
            }
        }
        other => Err(AppError::BadRequest(format!("Unknown action {}.", other))),
    }
}
