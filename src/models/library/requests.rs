use super::entities::ResourceType;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct LibraryResourceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub id: Option<i64>,
    pub course_id: Option<i64>,
    pub resource_type: Option<ResourceType>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct CreateLibraryResourceRequest {
    pub title: String,
    pub author: Option<String>,
    pub resource_type: ResourceType,
    pub url: Option<String>,
    pub isbn: Option<String>,
    pub course_id: Option<i64>,
    pub total_copies: Option<i32>,
    // 缺省与 total_copies 相同
    pub available_copies: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct UpdateLibraryResourceRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub url: Option<String>,
    pub isbn: Option<String>,
    pub course_id: Option<i64>,
    pub total_copies: Option<i32>,
    pub available_copies: Option<i32>,
}

// 资源列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct LibraryResourceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub resource_type: Option<ResourceType>,
    pub search: Option<String>,
}
