//! Bungie clan moderation from Discord.
//!
//! Pending applications are announced in the mod channel with approve and deny buttons,
//! and the clan role is kept in line with the Bungie member list through linked
//! profiles.

use std::{
    collections::{HashMap, HashSet},
    time::Duration as StdDuration,
};

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage,
};

use crate::{
    data::{
        bungie_profile::BungieProfileRepository,
        pending_clan_invite::PendingClanInviteRepository,
    },
    error::AppError,
    model::{
        clan_invite::{ClanApplicant, PendingClanInvite},
        server_config::ServerConfig,
    },
    service::{bungie::ClanApi, gateway::DiscordGateway},
};

pub const INVITE_APPROVE_PREFIX: &str = "clan_invite_approve_";
pub const INVITE_DENY_PREFIX: &str = "clan_invite_deny_";

const INVITE_TITLE: &str = "📥 Clan Join Request";
const INVITE_TRACKING_DAYS: i64 = 7;

/// Outcome of a moderator pressing approve or deny.
#[derive(Debug)]
pub struct InviteResolution {
    /// Replacement for the request embed.
    pub embed: CreateEmbed,
    /// Public follow-up for the mod channel.
    pub summary: String,
}

/// Role changes made by one sync.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleSyncReport {
    pub added: Vec<u64>,
    pub removed: Vec<u64>,
}

pub struct ClanService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a dyn DiscordGateway,
    clan: &'a dyn ClanApi,
}

impl<'a> ClanService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        discord: &'a dyn DiscordGateway,
        clan: &'a dyn ClanApi,
    ) -> Self {
        Self { db, discord, clan }
    }

    /// Posts every pending applicant not yet announced to the mod channel and tracks it.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Membership ids announced by this run
    pub async fn announce_applicants(
        &self,
        config: &ServerConfig,
        now: DateTime<Utc>,
        post_delay: StdDuration,
    ) -> Result<Vec<String>, AppError> {
        let (Some(admin), Some(mod_channel_id)) = (config.clan_admin_id, config.mod_channel_id)
        else {
            return Ok(Vec::new());
        };

        let repo = PendingClanInviteRepository::new(self.db);
        let applicants = self.clan.pending_applicants(admin).await?;

        let mut announced = Vec::new();
        for applicant in applicants {
            if repo.find(&applicant.membership_id).await?.is_some() {
                continue;
            }

            let message = CreateMessage::new()
                .embed(invite_embed(&applicant))
                .components(invite_buttons(&applicant.membership_id));
            let message_id = match self.discord.send_message(mod_channel_id, message).await {
                Ok(id) => id,
                Err(e) => {
                    tracing::error!(
                        "Failed to announce clan applicant {} in guild {}: {}",
                        applicant.membership_id,
                        config.guild_id,
                        e
                    );
                    continue;
                }
            };

            repo.track(PendingClanInvite {
                membership_id: applicant.membership_id.clone(),
                membership_type: applicant.membership_type,
                bungie_name: applicant.bungie_name,
                guild_id: config.guild_id,
                message_id,
                expires_at: now + Duration::days(INVITE_TRACKING_DAYS),
            })
            .await?;

            announced.push(applicant.membership_id);
            tokio::time::sleep(post_delay).await;
        }

        Ok(announced)
    }

    /// Approves or denies a tracked application on behalf of `moderator`.
    ///
    /// On approval the clan role goes to the Discord user linked to the membership.
    ///
    /// # Returns
    /// - `Ok(InviteResolution)` - Bungie accepted the action and the invite is untracked
    /// - `Err(AppError::BadRequest)` - The guild has no clan admin
    /// - `Err(AppError::NotFound)` - The request is no longer tracked
    /// - `Err(AppError::BungieErr)` - Bungie rejected the action
    pub async fn resolve_invite(
        &self,
        config: &ServerConfig,
        membership_id: &str,
        approve: bool,
        moderator: &str,
    ) -> Result<InviteResolution, AppError> {
        let admin = config
            .clan_admin_id
            .ok_or_else(|| AppError::BadRequest("No clan admin is configured.".to_string()))?;

        let repo = PendingClanInviteRepository::new(self.db);
        let invite = repo.find(membership_id).await?.ok_or_else(|| {
            AppError::NotFound("This clan request is no longer pending.".to_string())
        })?;

        if approve {
            self.clan
                .approve(admin, invite.membership_type, &invite.membership_id)
                .await?;
        } else {
            self.clan
                .deny(admin, invite.membership_type, &invite.membership_id)
                .await?;
        }
        repo.untrack(&invite.membership_id).await?;

        tracing::info!(
            "{} {} clan request of {}",
            moderator,
            if approve { "approved" } else { "denied" },
            invite.bungie_name
        );

        let summary = if approve {
            format!(
                "✅ **{}** was accepted.{}",
                invite.bungie_name,
                self.grant_clan_role(config, &invite.membership_id).await?
            )
        } else {
            format!("🗑️ Request from **{}** denied.", invite.bungie_name)
        };

        Ok(InviteResolution {
            embed: resolved_invite_embed(&invite, approve, moderator),
            summary,
        })
    }

    async fn grant_clan_role(
        &self,
        config: &ServerConfig,
        membership_id: &str,
    ) -> Result<String, AppError> {
        let Some(role_id) = config.clan_role_id else {
            return Ok(String::new());
        };
        let Some(profile) = BungieProfileRepository::new(self.db)
            .find_by_membership_id(membership_id)
            .await?
        else {
            return Ok(" Discord profile not linked.".to_string());
        };

        match self
            .discord
            .add_role(config.guild_id, profile.discord_id, role_id)
            .await
        {
            Ok(()) => Ok(format!(
                " Role <@&{}> given to <@{}>.",
                role_id, profile.discord_id
            )),
            Err(e) if e.is_missing_or_forbidden() => {
                tracing::warn!(
                    "Could not give clan role to {}: {}",
                    profile.discord_id,
                    e
                );
                Ok(format!(
                    " Linked user (<@{}>) not found.",
                    profile.discord_id
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Gives the clan role to linked clan members and takes it from everyone else.
    pub async fn sync_roles(&self, config: &ServerConfig) -> Result<RoleSyncReport, AppError> {
        let (Some(role_id), Some(admin)) = (config.clan_role_id, config.clan_admin_id) else {
            return Ok(RoleSyncReport::default());
        };

        let clan_members = self.clan.clan_member_ids(admin).await?;
        // An empty roster is more likely a Bungie hiccup than an empty clan.
        if clan_members.is_empty() {
            return Ok(RoleSyncReport::default());
        }

        let discord_by_membership: HashMap<String, u64> = BungieProfileRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|p| (p.membership_id, p.discord_id))
            .collect();
        let in_clan: HashSet<u64> = clan_members
            .iter()
            .filter_map(|id| discord_by_membership.get(id).copied())
            .collect();

        let mut report = RoleSyncReport::default();
        for member in self.discord.guild_members(config.guild_id).await? {
            if member.is_bot {
                continue;
            }

            let has_role = member.role_ids.contains(&role_id);
            let should_have = in_clan.contains(&member.user_id);

            let result = match (should_have, has_role) {
                (true, false) => self
                    .discord
                    .add_role(config.guild_id, member.user_id, role_id)
                    .await
                    .map(|_| report.added.push(member.user_id)),
                (false, true) => self
                    .discord
                    .remove_role(config.guild_id, member.user_id, role_id)
                    .await
                    .map(|_| report.removed.push(member.user_id)),
                _ => Ok(()),
            };

            if let Err(e) = result {
                tracing::error!(
                    "Failed to sync clan role of {} in guild {}: {}",
                    member.user_id,
                    config.guild_id,
                    e
                );
            }
        }

        Ok(report)
    }
}

pub fn invite_embed(applicant: &ClanApplicant) -> CreateEmbed {
    CreateEmbed::new()
        .title(INVITE_TITLE)
        .description(format!(
            "**{}** applied to join the clan.",
            applicant.bungie_name
        ))
        .colour(Colour::BLUE)
        .field("Bungie ID", format!("`{}`", applicant.membership_id), false)
        .footer(CreateEmbedFooter::new("Use the buttons below."))
}

fn invite_buttons(membership_id: &str) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(format!("{}{}", INVITE_APPROVE_PREFIX, membership_id))
            .label("Approve")
            .style(ButtonStyle::Success),
        CreateButton::new(format!("{}{}", INVITE_DENY_PREFIX, membership_id))
            .label("Deny")
            .style(ButtonStyle::Danger),
    ])]
}

fn resolved_invite_embed(invite: &PendingClanInvite, approved: bool, moderator: &str) -> CreateEmbed {
    let (colour, verb) = if approved {
        (Colour::DARK_GREEN, "approved")
    } else {
        (Colour::RED, "denied")
    };

    CreateEmbed::new()
        .title(INVITE_TITLE)
        .description(format!("**{}** applied to join the clan.", invite.bungie_name))
        .colour(colour)
        .field("Bungie ID", format!("`{}`", invite.membership_id), false)
        .footer(CreateEmbedFooter::new(format!(
            "Request {} by {}",
            verb, moderator
        )))
}
