//! Who may create and manage events.

use sea_orm::DatabaseConnection;

use crate::{
    data::{designated_channel::DesignatedChannelRepository, event_permission::EventPermissionRepository},
    error::AppError,
    model::{
        event::Event,
        permission::{Actor, EventPermissionKind},
    },
};

pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether the actor may create events in the guild.
    ///
    /// Administrators always may. Otherwise, as long as no role of the guild holds
    /// `create_events` anyone may create, and once one does only holders of a granted role
    /// may.
    pub async fn can_create(&self, guild_id: u64, actor: &Actor) -> Result<bool, AppError> {
        if actor.is_administrator {
            return Ok(true);
        }

        let repo = EventPermissionRepository::new(self.db);
        if !repo
            .guild_has_any(guild_id, EventPermissionKind::CreateEvents)
            .await?
        {
            return Ok(true);
        }

        Ok(repo
            .any_role_has(guild_id, &actor.role_ids, EventPermissionKind::CreateEvents)
            .await?)
    }

    /// Whether the actor may perform `permission` on an event: its creator, an
    /// administrator, or a member of a role granted that permission.
    pub async fn can_manage(
        &self,
        event: &Event,
        actor: &Actor,
        permission: EventPermissionKind,
    ) -> Result<bool, AppError> {
        if actor.user_id == event.creator_id || actor.is_administrator {
            return Ok(true);
        }

        Ok(EventPermissionRepository::new(self.db)
            .any_role_has(event.guild_id, &actor.role_ids, permission)
            .await?)
    }

    /// `can_manage` as a guard.
    ///
    /// # Returns
    /// - `Ok(())` - Actor is allowed
    /// - `Err(AppError::Forbidden)` - Actor is not allowed
    pub async fn require_manage(
        &self,
        event: &Event,
        actor: &Actor,
        permission: EventPermissionKind,
    ) -> Result<(), AppError> {
        if self.can_manage(event, actor, permission).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "You need to be the event creator, an administrator, or hold the \"{}\" permission.",
            permission.label()
        )))
    }

    /// Whether events may be posted in a channel.
    ///
    /// Guilds without designated channels accept any channel.
    pub async fn is_event_channel(&self, guild_id: u64, channel_id: u64) -> Result<bool, AppError> {
        let channels = DesignatedChannelRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?;

        Ok(channels.is_empty() || channels.contains(&channel_id))
    }

    /// Summary for `/permissions list`, grouped by permission.
    pub async fn describe_grants(&self, guild_id: u64) -> Result<String, AppError> {
        let grants = EventPermissionRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?;

        if grants.is_empty() {
            return Ok("No event permissions are granted. Anyone may create events.".to_string());
        }

        let mut lines = vec!["**Event permissions**".to_string()];
        for kind in EventPermissionKind::ALL {
            let roles: Vec<String> = grants
                .iter()
                .filter(|g| g.permission == kind)
                .map(|g| format!("<@&{}>", g.role_id))
                .collect();
            if !roles.is_empty() {
                lines.push(format!("{}: {}", kind.label(), roles.join(", ")));
            }
        }

        Ok(lines.join("\n"))
    }
}
