//! Role-based grants for event management.

use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPermissionKind {
    CreateEvents,
    EditAnyEvent,
    DeleteAnyEvent,
    ManageAnyRsvp,
}

impl EventPermissionKind {
    pub const ALL: [EventPermissionKind; 4] = [
        Self::CreateEvents,
        Self::EditAnyEvent,
        Self::DeleteAnyEvent,
        Self::ManageAnyRsvp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateEvents => "create_events",
            Self::EditAnyEvent => "edit_any_event",
            Self::DeleteAnyEvent => "delete_any_event",
            Self::ManageAnyRsvp => "manage_any_rsvp",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Human label for command choices and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateEvents => "Create events",
            Self::EditAnyEvent => "Edit any event",
            Self::DeleteAnyEvent => "Delete any event",
            Self::ManageAnyRsvp => "Manage any RSVP",
        }
    }
}

/// A permission granted to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPermission {
    pub guild_id: u64,
    pub role_id: u64,
    pub permission: EventPermissionKind,
}

impl EventPermission {
    pub fn from_entity(entity: entity::event_permission::Model) -> Result<Self, DbErr> {
        let permission = EventPermissionKind::parse(&entity.permission).ok_or_else(|| {
            DbErr::Custom(format!("Failed to parse permission: '{}'", entity.permission))
        })?;

        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            role_id: parse_snowflake(&entity.role_id, "role_id")?,
            permission,
        })
    }
}

/// The facts about an acting member needed for permission decisions.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub user_id: u64,
    pub role_ids: Vec<u64>,
    pub is_administrator: bool,
}
