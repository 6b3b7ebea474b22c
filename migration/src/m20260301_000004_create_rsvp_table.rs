use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rsvp::Table)
                    .if_not_exists()
                    .col(pk_auto(Rsvp::Id))
                    .col(integer(Rsvp::EventId))
                    .col(string(Rsvp::UserId))
                    .col(string(Rsvp::Status))
                    .col(timestamp(Rsvp::RespondedAt))
                    .col(string(Rsvp::Attendance).default("pending"))
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_rsvp_event_user_unique")
                            .col(Rsvp::EventId)
                            .col(Rsvp::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rsvp_event_id")
                            .from(Rsvp::Table, Rsvp::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rsvp::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rsvp {
    Table,
    Id,
    EventId,
    UserId,
    Status,
    RespondedAt,
    Attendance,
}
