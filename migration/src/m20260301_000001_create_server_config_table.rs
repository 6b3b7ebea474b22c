use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerConfig::Table)
                    .if_not_exists()
                    .col(string(ServerConfig::GuildId).primary_key())
                    .col(string_null(ServerConfig::DigestChannelId))
                    .col(string_null(ServerConfig::RankingChannelId))
                    .col(string_null(ServerConfig::ModChannelId))
                    .col(string_null(ServerConfig::PenaltyRoleId))
                    .col(string_null(ServerConfig::ClanRoleId))
                    .col(string_null(ServerConfig::ClanAdminId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RankingRoles::Table)
                    .if_not_exists()
                    .col(string(RankingRoles::GuildId).primary_key())
                    .col(string(RankingRoles::Tier1RoleId))
                    .col(string(RankingRoles::Tier2RoleId))
                    .col(string(RankingRoles::Tier3RoleId))
                    .col(string(RankingRoles::Tier4RoleId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RankingRoles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ServerConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerConfig {
    Table,
    GuildId,
    DigestChannelId,
    RankingChannelId,
    ModChannelId,
    PenaltyRoleId,
    ClanRoleId,
    ClanAdminId,
}

#[derive(DeriveIden)]
pub enum RankingRoles {
    Table,
    GuildId,
    #[sea_orm(iden = "tier_1_role_id")]
    Tier1RoleId,
    #[sea_orm(iden = "tier_2_role_id")]
    Tier2RoleId,
    #[sea_orm(iden = "tier_3_role_id")]
    Tier3RoleId,
    #[sea_orm(iden = "tier_4_role_id")]
    Tier4RoleId,
}
