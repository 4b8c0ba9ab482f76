//! 角色实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 未知角色名返回 None
    pub fn into_role(self) -> Option<crate::models::users::entities::Role> {
        use crate::models::users::entities::{Role, UserRole};

        let name = self.name.parse::<UserRole>().ok()?;
        Some(Role {
            id: self.id,
            name,
            description: self.description,
        })
    }
}
