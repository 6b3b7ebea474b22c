//! RSVP factory for creating test RSVP rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for RSVP rows. Defaults to a `going` response with `pending` attendance
/// recorded now.
pub struct RsvpFactory<'a> {
    db: &'a DatabaseConnection,
    event_id: i32,
    user_id: String,
    status: String,
    responded_at: DateTime<Utc>,
    attendance: String,
}

impl<'a> RsvpFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, event_id: i32, user_id: impl Into<String>) -> Self {
        Self {
            db,
            event_id,
            user_id: user_id.into(),
            status: "going".to_string(),
            responded_at: Utc::now(),
            attendance: "pending".to_string(),
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn responded_at(mut self, responded_at: DateTime<Utc>) -> Self {
        self.responded_at = responded_at;
        self
    }

    pub fn attendance(mut self, attendance: impl Into<String>) -> Self {
        self.attendance = attendance.into();
        self
    }

    /// Inserts the RSVP row.
    pub async fn build(self) -> Result<entity::rsvp::Model, DbErr> {
        entity::rsvp::ActiveModel {
            id: ActiveValue::NotSet,
            event_id: ActiveValue::Set(self.event_id),
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            responded_at: ActiveValue::Set(self.responded_at),
            attendance: ActiveValue::Set(self.attendance),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an RSVP with the given status.
pub async fn create_rsvp(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: impl Into<String>,
    status: impl Into<String>,
) -> Result<entity::rsvp::Model, DbErr> {
    RsvpFactory::new(db, event_id, user_id)
        .status(status)
        .build()
        .await
}
