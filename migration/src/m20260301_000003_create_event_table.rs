use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::GuildId))
                    .col(string(Event::ChannelId))
                    .col(string(Event::CreatorId))
                    .col(string(Event::Title))
                    .col(text_null(Event::Description))
                    .col(string(Event::ActivityType))
                    .col(integer(Event::MaxAttendees))
                    .col(timestamp(Event::EventTime))
                    .col(
                        timestamp(Event::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string(Event::Status).default("active"))
                    .col(timestamp_null(Event::DeleteMessageAfter))
                    .col(string_null(Event::MessageId).unique_key())
                    .col(string_null(Event::ThreadId))
                    .col(string_null(Event::TempRoleId))
                    .col(string_null(Event::VoiceChannelId))
                    .col(boolean(Event::ReminderSent).default(false))
                    .col(boolean(Event::ConfirmationSent).default(false))
                    .col(boolean(Event::AttendanceChecked).default(false))
                    .to_owned(),
            )
            .await?;

        // Every scheduler query filters on status and event_time
        manager
            .create_index(
                Index::create()
                    .name("idx_event_status_event_time")
                    .table(Event::Table)
                    .col(Event::Status)
                    .col(Event::EventTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_event_status_event_time")
                    .table(Event::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    GuildId,
    ChannelId,
    CreatorId,
    Title,
    Description,
    ActivityType,
    MaxAttendees,
    EventTime,
    CreatedAt,
    Status,
    DeleteMessageAfter,
    MessageId,
    ThreadId,
    TempRoleId,
    VoiceChannelId,
    ReminderSent,
    ConfirmationSent,
    AttendanceChecked,
}
