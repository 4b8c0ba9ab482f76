//! 图书馆资源实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "library_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub resource_type: String,
    pub url: Option<String>,
    pub isbn: Option<String>,
    pub course_id: Option<i64>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_library_resource(self) -> crate::models::library::entities::LibraryResource {
        use super::{parse_column, ts_to_datetime};
        use crate::models::library::entities::{LibraryResource, ResourceType};

        LibraryResource {
            id: self.id,
            title: self.title,
            author: self.author,
            resource_type: parse_column(
                "library_resources.resource_type",
                &self.resource_type,
                ResourceType::Other,
            ),
            url: self.url,
            isbn: self.isbn,
            course_id: self.course_id,
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            created_by: self.created_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
