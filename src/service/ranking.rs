//! Weekly voice leaderboard and tier roles.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage};

use crate::{
    data::voice_session::VoiceSessionRepository,
    error::AppError,
    model::{ranking::tier_for_seconds, server_config::RankingRoles, voice_session::VoiceTotal},
    service::gateway::DiscordGateway,
    util::time::TIMEZONE,
};

pub const LEADERBOARD_TITLE: &str = "🏆 Weekly Activity Ranking";
const PROMOTIONS_TITLE: &str = "🎉 Weekly Ranking Promotions!";
const PROMOTIONS_COLOR: u32 = 0x2ecc71;
const LEADERBOARD_SIZE: usize = 20;
const RANKING_PERIOD_DAYS: i64 = 7;

pub struct RankingService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a dyn DiscordGateway,
}

impl<'a> RankingService<'a> {
    pub fn new(db: &'a DatabaseConnection, discord: &'a dyn DiscordGateway) -> Self {
        Self { db, discord }
    }

    async fn weekly_totals(
        &self,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VoiceTotal>, AppError> {
        Ok(VoiceSessionRepository::new(self.db)
            .get_totals_since(guild_id, now - Duration::days(RANKING_PERIOD_DAYS))
            .await?)
    }

    /// Posts the leaderboard, editing the previous one when the bot can still find it.
    pub async fn post_leaderboard(
        &self,
        guild_id: u64,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let totals = self.weekly_totals(guild_id, now).await?;
        let embed = leaderboard_embed(&totals, now);

        match self
            .discord
            .find_bot_message(channel_id, LEADERBOARD_TITLE)
            .await?
        {
            Some(message_id) => {
                self.discord
                    .edit_message(channel_id, message_id, EditMessage::new().embed(embed))
                    .await?
            }
            None => {
                self.discord
                    .send_message(channel_id, CreateMessage::new().embed(embed))
                    .await?;
            }
        }

        Ok(())
    }

    /// Gives every member the tier role matching their weekly voice time.
    ///
    /// Other tier roles are removed first. Members reaching a tier above the first that
    /// they did not already hold are announced in the ranking channel.
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Promoted users
    pub async fn update_roles(
        &self,
        guild_id: u64,
        channel_id: u64,
        roles: &RankingRoles,
        now: DateTime<Utc>,
    ) -> Result<Vec<u64>, AppError> {
        let totals = self.weekly_totals(guild_id, now).await?;
        let members = self.discord.guild_members(guild_id).await?;

        let mut promotions = Vec::new();
        for member in members.iter().filter(|m| !m.is_bot) {
            let seconds = totals
                .iter()
                .find(|t| t.user_id == member.user_id)
                .map_or(0, |t| t.seconds);
            let tier = tier_for_seconds(seconds);
            let Some(target) = roles.role_for_tier(tier) else {
                continue;
            };

            let had_target = member.role_ids.contains(&target);
            let stale: Vec<u64> = roles
                .tier_role_ids
                .iter()
                .copied()
                .filter(|id| *id != target && member.role_ids.contains(id))
                .collect();

            if let Err(e) = self
                .apply_tier(guild_id, member.user_id, target, had_target, &stale)
                .await
            {
                tracing::error!(
                    "Failed to update ranking role of {} in guild {}: {}",
                    member.user_id,
                    guild_id,
                    e
                );
                continue;
            }

            if tier > 1 && !had_target {
                promotions.push((member.user_id, target));
            }
        }

        if !promotions.is_empty() {
            let lines: Vec<String> = promotions
                .iter()
                .map(|(user_id, role_id)| format!("👑 <@{}> reached <@&{}>!", user_id, role_id))
                .collect();
            let embed = CreateEmbed::new()
                .title(PROMOTIONS_TITLE)
                .description(lines.join("\n"))
                .colour(PROMOTIONS_COLOR);
            self.discord
                .send_message(channel_id, CreateMessage::new().embed(embed))
                .await?;
        }

        tracing::info!(
            "Updated ranking roles in guild {} ({} promotions)",
            guild_id,
            promotions.len()
        );

        Ok(promotions.into_iter().map(|(user_id, _)| user_id).collect())
    }

    async fn apply_tier(
        &self,
        guild_id: u64,
        user_id: u64,
        target: u64,
        had_target: bool,
        stale: &[u64],
    ) -> Result<(), AppError> {
        for role_id in stale {
            self.discord.remove_role(guild_id, user_id, *role_id).await?;
        }
        if !had_target {
            self.discord.add_role(guild_id, user_id, target).await?;
        }

        Ok(())
    }
}

/// Leaderboard embed for the top weekly voice totals.
pub fn leaderboard_embed(totals: &[VoiceTotal], now: DateTime<Utc>) -> CreateEmbed {
    let standings = if totals.is_empty() {
        "No voice activity recorded in the last week.".to_string()
    } else {
        totals
            .iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, total)| {
                format!("{}. <@{}> - **{:.1} hours**", i + 1, total.user_id, total.hours())
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title(LEADERBOARD_TITLE)
        .description("Top members by voice channel time over the last 7 days.")
        .colour(Colour::GOLD)
        .field("Standings", standings, false)
        .footer(CreateEmbedFooter::new(format!(
            "Updated: {}",
            now.with_timezone(&TIMEZONE).format("%d/%m/%Y %H:%M")
        )))
}
