use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "server_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub digest_channel_id: Option<String>,
    pub ranking_channel_id: Option<String>,
    pub mod_channel_id: Option<String>,
    pub penalty_role_id: Option<String>,
    pub clan_role_id: Option<String>,
    pub clan_admin_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
