use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pending_clan_invite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub membership_id: String,
    pub membership_type: i32,
    pub bungie_name: String,
    pub guild_id: String,
    pub message_id: String,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
