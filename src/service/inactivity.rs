//! Inactivity policy.
//!
//! Members who answered at least one event of the guild but have not attended any
//! within the last two weeks are warned. After three weeks they are removed from the
//! Bungie clan, when linked, and from the guild.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    time::Duration as StdDuration,
};

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::CreateMessage;

use crate::{
    data::{
        bungie_profile::BungieProfileRepository,
        rsvp::{GuildRsvpActivity, RsvpRepository},
    },
    error::AppError,
    model::{rsvp::AttendanceStatus, server_config::ServerConfig},
    service::{bungie::ClanApi, gateway::DiscordGateway},
};

const WARN_AFTER_WEEKS: i64 = 2;
const REMOVE_AFTER_WEEKS: i64 = 3;

const REMOVAL_DM: &str = "Hello. Because you have been inactive for more than 3 weeks, \
                          your access to the server has been revoked.";
const WARNING_DM: &str = "👋 Activity reminder: we noticed you haven't taken part in an \
                          event for more than 2 weeks.";
const KICK_REASON: &str = "Inactive for 3 weeks.";

/// Users acted on by one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InactivityReport {
    pub removed: Vec<u64>,
    pub warned: Vec<u64>,
}

/// Users whose latest attended event is before `cutoff`, or who never attended one.
///
/// Only users with at least one RSVP appear in `activity`, so only they can be returned.
pub fn inactive_users(activity: &[GuildRsvpActivity], cutoff: DateTime<Utc>) -> BTreeSet<u64> {
    let mut last_attended: HashMap<u64, Option<DateTime<Utc>>> = HashMap::new();

    for row in activity {
        let entry = last_attended.entry(row.user_id).or_default();
        if row.attendance == AttendanceStatus::Attended {
            *entry = Some(entry.map_or(row.event_time, |t| t.max(row.event_time)));
        }
    }

    last_attended
        .into_iter()
        .filter(|(_, last)| last.is_none_or(|t| t < cutoff))
        .map(|(user_id, _)| user_id)
        .collect()
}

pub struct InactivityService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a dyn DiscordGateway,
    clan: Option<&'a dyn ClanApi>,
    dm_delay: StdDuration,
}

impl<'a> InactivityService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        discord: &'a dyn DiscordGateway,
        clan: Option<&'a dyn ClanApi>,
        dm_delay: StdDuration,
    ) -> Self {
        Self {
            db,
            discord,
            clan,
            dm_delay,
        }
    }

    /// Applies the policy to one guild. Needs the mod channel of `config`.
    pub async fn run(
        &self,
        config: &ServerConfig,
        now: DateTime<Utc>,
    ) -> Result<InactivityReport, AppError> {
        let Some(mod_channel_id) = config.mod_channel_id else {
            return Ok(InactivityReport::default());
        };
        let guild_id = config.guild_id;

        let members: HashSet<u64> = self
            .discord
            .guild_members(guild_id)
            .await?
            .into_iter()
            .filter(|m| !m.is_bot)
            .map(|m| m.user_id)
            .collect();
        let activity = RsvpRepository::new(self.db)
            .get_activity_by_guild(guild_id)
            .await?;

        let to_remove: Vec<u64> =
            inactive_users(&activity, now - Duration::weeks(REMOVE_AFTER_WEEKS))
                .into_iter()
                .filter(|user| members.contains(user))
                .collect();
        let to_warn: Vec<u64> = inactive_users(&activity, now - Duration::weeks(WARN_AFTER_WEEKS))
            .into_iter()
            .filter(|user| members.contains(user) && !to_remove.contains(user))
            .collect();

        let clan_members = self.clan_members(config).await;

        for user_id in &to_remove {
            self.dm(*user_id, REMOVAL_DM).await;
            self.remove_from_clan(config, *user_id, &clan_members, mod_channel_id)
                .await;

            let note = match self
                .discord
                .kick_member(guild_id, *user_id, KICK_REASON)
                .await
            {
                Ok(()) => {
                    tracing::info!("Kicked {} from guild {} for inactivity", user_id, guild_id);
                    format!(
                        "🚨 <@{}> (`{}`) was removed from Discord for inactivity.",
                        user_id, user_id
                    )
                }
                Err(e) => {
                    tracing::warn!("Failed to kick {} from guild {}: {}", user_id, guild_id, e);
                    format!("⚠️ Failed to remove <@{}> (`{}`) from Discord.", user_id, user_id)
                }
            };
            self.mod_note(mod_channel_id, note).await;
        }

        for user_id in &to_warn {
            self.dm(*user_id, WARNING_DM).await;
        }

        Ok(InactivityReport {
            removed: to_remove,
            warned: to_warn,
        })
    }

    async fn clan_members(&self, config: &ServerConfig) -> HashSet<String> {
        let (Some(clan), Some(admin)) = (self.clan, config.clan_admin_id) else {
            return HashSet::new();
        };

        match clan.clan_member_ids(admin).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch clan members for guild {}: {}",
                    config.guild_id,
                    e
                );
                HashSet::new()
            }
        }
    }

    async fn remove_from_clan(
        &self,
        config: &ServerConfig,
        user_id: u64,
        clan_members: &HashSet<String>,
        mod_channel_id: u64,
    ) {
        let (Some(clan), Some(admin)) = (self.clan, config.clan_admin_id) else {
            return;
        };

        let profile = match BungieProfileRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await
        {
            Ok(Some(profile)) if clan_members.contains(&profile.membership_id) => profile,
            Ok(_) => return,
            Err(e) => {
                tracing::error!("Failed to load Bungie profile of {}: {}", user_id, e);
                return;
            }
        };

        let note = match clan
            .kick(admin, profile.membership_type, &profile.membership_id)
            .await
        {
            Ok(()) => format!(
                "🌐 <@{}> (`{}`) was removed from the Bungie clan.",
                user_id, user_id
            ),
            Err(e) => {
                tracing::warn!("Failed to remove {} from the clan: {}", user_id, e);
                format!("⚠️ Failed to remove <@{}> from the Bungie clan.", user_id)
            }
        };
        self.mod_note(mod_channel_id, note).await;
    }

    async fn dm(&self, user_id: u64, text: &str) {
        if let Err(e) = self
            .discord
            .send_dm(user_id, CreateMessage::new().content(text))
            .await
        {
            tracing::debug!("Could not DM {}: {}", user_id, e);
        }
        tokio::time::sleep(self.dm_delay).await;
    }

    async fn mod_note(&self, channel_id: u64, note: String) {
        if let Err(e) = self
            .discord
            .send_message(channel_id, CreateMessage::new().content(note))
            .await
        {
            tracing::error!("Failed to post to mod channel {}: {}", channel_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{
        bungie::fake::{ClanCall, FakeClan},
        gateway::fake::{DiscordCall, FakeDiscord},
    };
    use chrono::TimeZone;
    use sea_orm::DbErr;
    use test_utils::{
        builder::TestBuilder,
        factory::{event::EventFactory, rsvp::RsvpFactory},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).unwrap()
    }

    fn row(user_id: u64, attendance: AttendanceStatus, days_ago: i64) -> GuildRsvpActivity {
        GuildRsvpActivity {
            user_id,
            attendance,
            event_time: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn latest_attendance_decides() {
        let activity = vec![
            row(1, AttendanceStatus::Attended, 30),
            row(1, AttendanceStatus::Attended, 3),
            row(2, AttendanceStatus::Attended, 30),
            row(2, AttendanceStatus::Absent, 1),
            row(3, AttendanceStatus::Pending, 1),
        ];

        let inactive = inactive_users(&activity, now() - Duration::weeks(3));

        assert_eq!(inactive.into_iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    async fn attend(
        db: &DatabaseConnection,
        user: &str,
        days_ago: i64,
        attendance: &str,
    ) -> Result<(), DbErr> {
        let event = EventFactory::new(db)
            .guild_id("1")
            .event_time(now() - Duration::days(days_ago))
            .build()
            .await?;
        RsvpFactory::new(db, event.id, user)
            .attendance(attendance)
            .build()
            .await?;

        Ok(())
    }

    /// Tests a guild with a long inactive linked member, a recently lapsed member and an
    /// active one.
    ///
    /// Expected: First removed from clan and guild, second only warned, third untouched
    #[tokio::test]
    async fn removes_and_warns_separately() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        attend(db, "10", 30, "attended").await?;
        attend(db, "11", 17, "attended").await?;
        attend(db, "12", 2, "attended").await?;
        test_utils::factory::create_bungie_profile(db, "10", "4611686018400000010").await?;

        let config = ServerConfig {
            mod_channel_id: Some(900),
            clan_admin_id: Some(1),
            ..ServerConfig::empty(1)
        };
        let fake = FakeDiscord::new()
            .with_member(10, false, &[])
            .with_member(11, false, &[])
            .with_member(12, false, &[]);
        let clan = FakeClan::new().with_member("4611686018400000010");

        let report = InactivityService::new(db, &fake, Some(&clan), StdDuration::ZERO)
            .run(&config, now())
            .await
            .unwrap();

        assert_eq!(report.removed, vec![10]);
        assert_eq!(report.warned, vec![11]);
        assert_eq!(fake.dm_recipients(), vec![10, 11]);
        assert!(fake.calls().contains(&DiscordCall::KickMember {
            guild_id: 1,
            user_id: 10
        }));
        assert_eq!(
            clan.calls(),
            vec![ClanCall::Kick {
                membership_id: "4611686018400000010".to_string()
            }]
        );

        let notes: Vec<String> = fake
            .sent_messages()
            .into_iter()
            .map(|(_, body)| body["content"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            notes,
            vec![
                "🌐 <@10> (`10`) was removed from the Bungie clan.".to_string(),
                "🚨 <@10> (`10`) was removed from Discord for inactivity.".to_string(),
            ]
        );

        Ok(())
    }

    /// Tests that users who already left the guild and bots are ignored.
    ///
    /// Expected: Empty report and no Discord calls
    #[tokio::test]
    async fn ignores_departed_users_and_bots() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        attend(db, "10", 30, "absent").await?;
        attend(db, "20", 30, "absent").await?;

        let config = ServerConfig {
            mod_channel_id: Some(900),
            ..ServerConfig::empty(1)
        };
        let fake = FakeDiscord::new().with_member(20, true, &[]);

        let report = InactivityService::new(db, &fake, None, StdDuration::ZERO)
            .run(&config, now())
            .await
            .unwrap();

        assert_eq!(report, InactivityReport::default());
        assert!(fake.calls().is_empty());

        Ok(())
    }
}
