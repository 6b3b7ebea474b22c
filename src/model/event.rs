//! Event domain model and lifecycle states.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Lifecycle state of an event.
///
/// `Active` is the only initial state. Both deletion states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Active,
    Cancelled,
    Completed,
    MessageDeletedCancelled,
    MessageDeletedCompleted,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::MessageDeletedCancelled => "message_deleted_cancelled",
            Self::MessageDeletedCompleted => "message_deleted_completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "message_deleted_cancelled" => Some(Self::MessageDeletedCancelled),
            "message_deleted_completed" => Some(Self::MessageDeletedCompleted),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal lifecycle edge.
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Cancelled)
                | (Self::Active, Self::Completed)
                | (Self::Cancelled, Self::MessageDeletedCancelled)
                | (Self::Completed, Self::MessageDeletedCompleted)
        )
    }

    /// The state an ended event moves to once its announcement is deleted.
    pub fn after_message_deleted(&self) -> Option<EventStatus> {
        match self {
            Self::Cancelled => Some(Self::MessageDeletedCancelled),
            Self::Completed => Some(Self::MessageDeletedCompleted),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::MessageDeletedCancelled | Self::MessageDeletedCompleted
        )
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled clan activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub guild_id: u64,
    /// Channel the announcement is posted in.
    pub channel_id: u64,
    pub creator_id: u64,
    pub title: String,
    pub description: Option<String>,
    /// Activity label as stored, e.g. "Raid". Unknown labels are kept verbatim.
    pub activity_type: String,
    pub max_attendees: i32,
    pub event_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub status: EventStatus,
    /// When the announcement of an ended event should be removed.
    pub delete_message_after: Option<DateTime<Utc>>,
    pub message_id: Option<u64>,
    pub thread_id: Option<u64>,
    pub temp_role_id: Option<u64>,
    pub voice_channel_id: Option<u64>,
    pub reminder_sent: bool,
    pub confirmation_sent: bool,
    pub attendance_checked: bool,
}

impl Event {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Event)` - Converted event
    /// - `Err(DbErr::Custom)` - A stored id or the status failed to parse
    pub fn from_entity(entity: entity::event::Model) -> Result<Self, DbErr> {
        let status = EventStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Failed to parse status: '{}'", entity.status))
        })?;

        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            creator_id: parse_snowflake(&entity.creator_id, "creator_id")?,
            title: entity.title,
            description: entity.description,
            activity_type: entity.activity_type,
            max_attendees: entity.max_attendees,
            event_time: entity.event_time,
            created_at: entity.created_at,
            status,
            delete_message_after: entity.delete_message_after,
            message_id: parse_optional_snowflake(entity.message_id.as_deref(), "message_id")?,
            thread_id: parse_optional_snowflake(entity.thread_id.as_deref(), "thread_id")?,
            temp_role_id: parse_optional_snowflake(
                entity.temp_role_id.as_deref(),
                "temp_role_id",
            )?,
            voice_channel_id: parse_optional_snowflake(
                entity.voice_channel_id.as_deref(),
                "voice_channel_id",
            )?,
            reminder_sent: entity.reminder_sent,
            confirmation_sent: entity.confirmation_sent,
            attendance_checked: entity.attendance_checked,
        })
    }

    /// Jump link to the announcement, once it has been posted.
    pub fn message_link(&self) -> Option<String> {
        self.message_id.map(|message_id| {
            format!(
                "https://discord.com/channels/{}/{}/{}",
                self.guild_id, self.channel_id, message_id
            )
        })
    }

    pub fn capacity(&self) -> usize {
        self.max_attendees.max(0) as usize
    }
}

/// Parameters for inserting a new event.
#[derive(Debug, Clone)]
pub struct CreateEventParams {
    pub guild_id: u64,
    pub channel_id: u64,
    pub creator_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub activity_type: String,
    pub max_attendees: i32,
    pub event_time: DateTime<Utc>,
    pub temp_role_id: Option<u64>,
}

/// Editable fields of an active event.
#[derive(Debug, Clone)]
pub struct UpdateEventParams {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub activity_type: String,
    pub max_attendees: i32,
    pub event_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EventStatus; 5] = [
        EventStatus::Active,
        EventStatus::Cancelled,
        EventStatus::Completed,
        EventStatus::MessageDeletedCancelled,
        EventStatus::MessageDeletedCompleted,
    ];

    #[test]
    fn only_lifecycle_edges_are_allowed() {
        let allowed: Vec<(EventStatus, EventStatus)> = ALL
            .iter()
            .flat_map(|from| ALL.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();

        assert_eq!(
            allowed,
            vec![
                (EventStatus::Active, EventStatus::Cancelled),
                (EventStatus::Active, EventStatus::Completed),
                (EventStatus::Cancelled, EventStatus::MessageDeletedCancelled),
                (EventStatus::Completed, EventStatus::MessageDeletedCompleted),
            ]
        );
    }

    #[test]
    fn terminal_states_have_no_exit() {
        for status in ALL.iter().filter(|s| s.is_terminal()) {
            assert!(ALL.iter().all(|next| !status.can_transition_to(*next)));
        }
    }

    #[test]
    fn status_strings_parse_back() {
        for status in ALL {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("ativo"), None);
    }

    #[test]
    fn converts_entity_and_builds_link() {
        let mut entity = test_utils::fixture::event::entity();
        entity.message_id = Some("444".to_string());

        let event = Event::from_entity(entity).unwrap();

        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(
            event.message_link().unwrap(),
            "https://discord.com/channels/111111111111111111/222222222222222222/444"
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let mut entity = test_utils::fixture::event::entity();
        entity.status = "archived".to_string();

        assert!(Event::from_entity(entity).is_err());
    }
}
