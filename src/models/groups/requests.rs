use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 分组查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub id: Option<i64>,
    pub course_id: Option<i64>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct CreateGroupRequest {
    pub name: String,
    pub course_id: Option<i64>,
    pub department_id: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub course_id: Option<i64>,
    pub department_id: Option<i64>,
    pub description: Option<String>,
}

// 分组成员查询 (?group_id=)
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupMemberParams {
    pub group_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct AddGroupMemberRequest {
    pub group_id: i64,
    pub user_id: i64,
}

// 分组列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GroupListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}
