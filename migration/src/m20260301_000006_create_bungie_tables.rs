use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BungieProfile::Table)
                    .if_not_exists()
                    .col(string(BungieProfile::DiscordId).primary_key())
                    .col(string(BungieProfile::MembershipId))
                    .col(integer(BungieProfile::MembershipType))
                    .col(string(BungieProfile::BungieName))
                    .col(text(BungieProfile::AccessToken))
                    .col(text(BungieProfile::RefreshToken))
                    .col(timestamp(BungieProfile::TokenExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bungie_profile_membership_id")
                    .table(BungieProfile::Table)
                    .col(BungieProfile::MembershipId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PendingClanInvite::Table)
                    .if_not_exists()
                    .col(string(PendingClanInvite::MembershipId).primary_key())
                    .col(integer(PendingClanInvite::MembershipType))
                    .col(string(PendingClanInvite::BungieName))
                    .col(string(PendingClanInvite::GuildId))
                    .col(string(PendingClanInvite::MessageId))
                    .col(timestamp(PendingClanInvite::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OauthState::Table)
                    .if_not_exists()
                    .col(string(OauthState::State).primary_key())
                    .col(string(OauthState::DiscordId))
                    .col(timestamp(OauthState::ExpiresAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthState::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PendingClanInvite::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bungie_profile_membership_id")
                    .table(BungieProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BungieProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BungieProfile {
    Table,
    DiscordId,
    MembershipId,
    MembershipType,
    BungieName,
    AccessToken,
    RefreshToken,
    TokenExpiresAt,
}

#[derive(DeriveIden)]
pub enum PendingClanInvite {
    Table,
    MembershipId,
    MembershipType,
    BungieName,
    GuildId,
    MessageId,
    ExpiresAt,
}

#[derive(DeriveIden)]
pub enum OauthState {
    Table,
    State,
    DiscordId,
    ExpiresAt,
}
