use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::permission::{EventPermission, EventPermissionKind};

use entity::event_permission::Column;

pub struct EventPermissionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventPermissionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grants a permission to a role.
    ///
    /// # Returns
    /// - `Ok(true)` - Grant created
    /// - `Ok(false)` - The role already held the permission
    pub async fn grant(
        &self,
        guild_id: u64,
        role_id: u64,
        permission: EventPermissionKind,
    ) -> Result<bool, DbErr> {
        if self.exists(guild_id, role_id, permission).await? {
            return Ok(false);
        }

        entity::event_permission::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            permission: ActiveValue::Set(permission.as_str().to_string()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// # Returns
    /// - `Ok(true)` - Grant removed
    /// - `Ok(false)` - The role did not hold the permission
    pub async fn revoke(
        &self,
        guild_id: u64,
        role_id: u64,
        permission: EventPermissionKind,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::EventPermission::delete_many()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::RoleId.eq(role_id.to_string()))
            .filter(Column::Permission.eq(permission.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<EventPermission>, DbErr> {
        entity::prelude::EventPermission::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(Column::Permission)
            .order_by_asc(Column::RoleId)
            .all(self.db)
            .await?
            .into_iter()
            .map(EventPermission::from_entity)
            .collect()
    }

    /// Whether any of the given roles holds the permission.
    pub async fn any_role_has(
        &self,
        guild_id: u64,
        role_ids: &[u64],
        permission: EventPermissionKind,
    ) -> Result<bool, DbErr> {
        if role_ids.is_empty() {
            return Ok(false);
        }

        let count = entity::prelude::EventPermission::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::RoleId.is_in(role_ids.iter().map(|id| id.to_string())))
            .filter(Column::Permission.eq(permission.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether any role of the guild holds the permission.
    pub async fn guild_has_any(
        &self,
        guild_id: u64,
        permission: EventPermissionKind,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::EventPermission::find()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::Permission.eq(permission.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    async fn exists(
        &self,
        guild_id: u64,
        role_id: u64,
        permission: EventPermissionKind,
    ) -> Result<bool, DbErr> {
        self.any_role_has(guild_id, &[role_id], permission).await
    }
}
