use super::{SeaOrmStorage, map_db_err};
use crate::entity::roles::{ActiveModel, Entity as Roles};
use crate::errors::Result;
use crate::models::users::entities::{Role, UserRole};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

impl SeaOrmStorage {
    /// 写入缺失的固定角色
    pub async fn ensure_roles_impl(&self) -> Result<()> {
        for role in UserRole::all_roles() {
            let existing = Roles::find_by_id(role.id())
                .one(&self.db)
                .await
                .map_err(|e| map_db_err("查询角色失败", e))?;
            if existing.is_some() {
                continue;
            }

            ActiveModel {
                id: Set(role.id()),
                name: Set(role.to_string()),
                description: Set(Some(role.description().to_string())),
            }
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("写入角色失败", e))?;

            info!("已写入角色: {}", role);
        }
        Ok(())
    }

    pub async fn list_roles_impl(&self) -> Result<Vec<Role>> {
        let roles = Roles::find()
            .order_by_asc(crate::entity::roles::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err("查询角色列表失败", e))?;

        Ok(roles.into_iter().filter_map(|m| m.into_role()).collect())
    }
}
