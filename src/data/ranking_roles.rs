use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::model::server_config::RankingRoles;

use entity::ranking_roles::Column;

pub struct RankingRolesRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankingRolesRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<RankingRoles>, DbErr> {
        entity::prelude::RankingRoles::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(RankingRoles::from_entity)
            .transpose()
    }

    /// Stores the four tier roles of a guild, replacing any previous set.
    pub async fn upsert(&self, guild_id: u64, tier_role_ids: [u64; 4]) -> Result<RankingRoles, DbErr> {
        let [t1, t2, t3, t4] = tier_role_ids.map(|id| ActiveValue::Set(id.to_string()));

        let entity = entity::prelude::RankingRoles::insert(entity::ranking_roles::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            tier_1_role_id: t1,
            tier_2_role_id: t2,
            tier_3_role_id: t3,
            tier_4_role_id: t4,
        })
        .on_conflict(
            OnConflict::column(Column::GuildId)
                .update_columns([
                    Column::Tier1RoleId,
                    Column::Tier2RoleId,
                    Column::Tier3RoleId,
                    Column::Tier4RoleId,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        RankingRoles::from_entity(entity)
    }
}
