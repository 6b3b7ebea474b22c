use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DesignatedEventChannel::Table)
                    .if_not_exists()
                    .col(string(DesignatedEventChannel::ChannelId).primary_key())
                    .col(string(DesignatedEventChannel::GuildId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_designated_event_channel_guild_id")
                    .table(DesignatedEventChannel::Table)
                    .col(DesignatedEventChannel::GuildId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventPermission::Table)
                    .if_not_exists()
                    .col(string(EventPermission::GuildId))
                    .col(string(EventPermission::RoleId))
                    .col(string(EventPermission::Permission))
                    .primary_key(
                        Index::create()
                            .col(EventPermission::GuildId)
                            .col(EventPermission::RoleId)
                            .col(EventPermission::Permission),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventPermission::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_designated_event_channel_guild_id")
                    .table(DesignatedEventChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DesignatedEventChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DesignatedEventChannel {
    Table,
    ChannelId,
    GuildId,
}

#[derive(DeriveIden)]
pub enum EventPermission {
    Table,
    GuildId,
    RoleId,
    Permission,
}
