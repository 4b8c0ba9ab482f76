use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub id: Option<i64>,
    pub department_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

// 创建课程请求
//
// teacher_id 若指定，必须是教师或院系角色的用户
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub department_id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub teacher_id: Option<i64>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}
