//! RSVP responses and the capacity policy applied to them.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsvpStatus {
    Going,
    NotGoing,
    Maybe,
    /// Explicit waitlist placement. Only managers can set it.
    Waitlisted,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Going => "going",
            Self::NotGoing => "not_going",
            Self::Maybe => "maybe",
            Self::Waitlisted => "waitlisted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "going" => Some(Self::Going),
            "not_going" => Some(Self::NotGoing),
            "maybe" => Some(Self::Maybe),
            "waitlisted" => Some(Self::Waitlisted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Pending,
    Attended,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Attended => "attended",
            Self::Absent => "absent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "attended" => Some(Self::Attended),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Who is changing an RSVP.
///
/// A user changing their own answer resets recorded attendance. A manager override keeps
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpSource {
    User,
    Manager,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rsvp {
    pub id: i32,
    pub event_id: i32,
    pub user_id: u64,
    pub status: RsvpStatus,
    pub responded_at: DateTime<Utc>,
    pub attendance: AttendanceStatus,
}

impl Rsvp {
    pub fn from_entity(entity: entity::rsvp::Model) -> Result<Self, DbErr> {
        let status = RsvpStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Failed to parse rsvp status: '{}'", entity.status))
        })?;
        let attendance = AttendanceStatus::parse(&entity.attendance).ok_or_else(|| {
            DbErr::Custom(format!("Failed to parse attendance: '{}'", entity.attendance))
        })?;

        Ok(Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            status,
            responded_at: entity.responded_at,
            attendance,
        })
    }
}

/// Responses of one event grouped for display.
///
/// Every list keeps first-come order (`responded_at`, then `id`). The first
/// `capacity` going responses are confirmed. Later going responses overflow into the
/// waitlist, followed by explicit `waitlisted` entries, which are never promoted even when
/// seats are free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub confirmed: Vec<Rsvp>,
    pub waitlist: Vec<Rsvp>,
    pub maybe: Vec<Rsvp>,
    pub not_going: Vec<Rsvp>,
}

impl Roster {
    pub fn new(mut rsvps: Vec<Rsvp>, capacity: usize) -> Self {
        rsvps.sort_by(|a, b| (a.responded_at, a.id).cmp(&(b.responded_at, b.id)));

        let mut roster = Roster::default();
        let mut explicit_waitlist = Vec::new();

        for rsvp in rsvps {
            match rsvp.status {
                RsvpStatus::Going if roster.confirmed.len() < capacity => {
                    roster.confirmed.push(rsvp)
                }
                RsvpStatus::Going => roster.waitlist.push(rsvp),
                RsvpStatus::Waitlisted => explicit_waitlist.push(rsvp),
                RsvpStatus::Maybe => roster.maybe.push(rsvp),
                RsvpStatus::NotGoing => roster.not_going.push(rsvp),
            }
        }

        roster.waitlist.extend(explicit_waitlist);
        roster
    }

    /// Users who answered "going", confirmed first and then overflow.
    pub fn going_user_ids(&self) -> Vec<u64> {
        self.confirmed
            .iter()
            .chain(
                self.waitlist
                    .iter()
                    .filter(|r| r.status == RsvpStatus::Going),
            )
            .map(|r| r.user_id)
            .collect()
    }

    /// Seats left before new "going" answers overflow.
    pub fn open_seats(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.confirmed.len())
    }
}
