use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub creator_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub activity_type: String,
    pub max_attendees: i32,
    pub event_time: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub status: String,
    pub delete_message_after: Option<DateTimeUtc>,
    pub message_id: Option<String>,
    pub thread_id: Option<String>,
    pub temp_role_id: Option<String>,
    pub voice_channel_id: Option<String>,
    pub reminder_sent: bool,
    pub confirmation_sent: bool,
    pub attendance_checked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rsvp::Entity")]
    Rsvp,
}

impl Related<super::rsvp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rsvp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
