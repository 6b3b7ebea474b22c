//! `/config`, server settings restricted to the owner and administrators.

use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, GuildId, Permissions,
};

use crate::{
    bot::{handler::Handler, reply},
    error::AppError,
    model::ranking::TIER_ROLES,
    service::server_config::ServerConfigService,
};

use super::options::Options;

pub const NAME: &str = "config";

fn channel_option(name: &str, description: &str, required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Channel, name, description)
        .channel_types(vec![ChannelType::Text])
        .required(required)
}

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Configure the bot for this server")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommandGroup,
                "event-channel",
                "Channels where events may be created",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "add",
                    "Allow events in a channel",
                )
                .add_sub_option(channel_option("channel", "Event channel", true)),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "remove",
                    "Stop allowing events in a channel",
                )
                .add_sub_option(channel_option("channel", "Event channel", true)),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "digest-channel",
                "Post the upcoming events twice a day, or stop when no channel is given",
            )
            .add_sub_option(channel_option("channel", "Digest channel", false)),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "ranking",
                "Post the weekly voice ranking and set up the tier roles",
            )
            .add_sub_option(channel_option("channel", "Ranking channel", true)),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "inactivity",
                "Enable inactivity warnings and removals",
            )
            .add_sub_option(channel_option(
                "mod_channel",
                "Channel for moderator notes",
                true,
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Role,
                "penalty_role",
                "Role for penalised members",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "clan-admin",
                "Member whose Bungie account performs clan actions",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Clan admin")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "clan-role",
                "Role kept in sync with the clan roster",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Clan role")
                    .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "show",
            "Show the current configuration",
        ))
}

pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let guild_id = command.guild_id.ok_or_else(|| {
        AppError::BadRequest("This command only works inside a server.".to_string())
    })?;
    require_owner_or_admin(ctx, command, guild_id).await?;

    let gateway = Handler::gateway(ctx);
    let service = ServerConfigService::new(&handler.db, &gateway);
    let guild_id = guild_id.get();

    let options = Options::new(&command.data.options);
    let Some((subcommand, args)) = options.subcommand() else {
        return Err(AppError::BadRequest("Pick a setting to change.".to_string()));
    };

    match subcommand {
        "event-channel" => {
            let (action, args) = args
                .subcommand()
                .ok_or_else(|| AppError::BadRequest("Choose add or remove.".to_string()))?;
            let channel_id = required(args.channel("channel"), "channel")?;
            if action == "add" {
                service.add_event_channel(guild_id, channel_id).await?;
                Ok(format!(
                    "✅ <#{}> was added to the event channels.",
                    channel_id
                ))
            } else if service.remove_event_channel(channel_id).await? {
                Ok(format!(
                    "🗑️ <#{}> was removed from the event channels.",
                    channel_id
                ))
            } else {
                Ok(format!("<#{}> is not an event channel.", channel_id))
            }
        }
        "digest-channel" => {
            let channel_id = args.channel("channel");
            service.set_digest_channel(guild_id, channel_id).await?;
            Ok(match channel_id {
                Some(id) => format!("✅ The daily event digest will be posted in <#{}>.", id),
                None => "🗑️ The daily event digest was turned off.".to_string(),
            })
        }
        "ranking" => {
            let channel_id = required(args.channel("channel"), "channel")?;
            let roles = service.setup_ranking(guild_id, channel_id).await?;
            let tiers: Vec<String> = TIER_ROLES
                .iter()
                .zip(roles.tier_role_ids)
                .map(|((name, _), id)| format!("{}: <@&{}>", name, id))
                .collect();
            Ok(format!(
                "✅ The weekly ranking will be posted in <#{}>.\n{}",
                channel_id,
                tiers.join("\n")
            ))
        }
        "inactivity" => {
            let mod_channel_id = required(args.channel("mod_channel"), "mod_channel")?;
            let penalty_role_id = args.role("penalty_role");
            service
                .set_inactivity(guild_id, mod_channel_id, penalty_role_id)
                .await?;
            Ok(format!(
                "✅ Inactivity notes will be posted in <#{}>.",
                mod_channel_id
            ))
        }
        "clan-admin" => {
            let user_id = required(args.user("user"), "user")?;
            service.set_clan_admin(guild_id, user_id).await?;
            Ok(format!(
                "✅ <@{}> is now the clan admin. Clan requests will use their Bungie account.",
                user_id
            ))
        }
        "clan-role" => {
            let role_id = required(args.role("role"), "role")?;
            service.set_clan_role(guild_id, role_id).await?;
            Ok(format!(
                "✅ <@&{}> was set as the official clan role.",
                role_id
            ))
        }
        "show" => service.describe(guild_id).await,
        other => Err(AppError::BadRequest(format!("Unknown setting {}.", other))),
    }
}

/// The guild owner passes even without the administrator permission on their roles.
async fn require_owner_or_admin(
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let actor = reply::actor(&command.user, command.member.as_ref());
    if actor.is_administrator {
        return Ok(());
    }

    let cached_owner = ctx.cache.guild(guild_id).map(|guild| guild.owner_id);
    let owner_id = match cached_owner {
        Some(owner_id) => owner_id,
        None => guild_id.to_partial_guild(&ctx.http).await?.owner_id,
    };

    if owner_id == command.user.id {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "This command is restricted to the server owner and administrators.".to_string(),
    ))
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("The {} option is required.", name)))
}
