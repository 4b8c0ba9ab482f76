use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub department_id: i64,
    // 授课教师
    pub teacher_id: Option<i64>,
    // 课程代码，全局唯一
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
