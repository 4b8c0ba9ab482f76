use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 考勤查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub id: Option<i64>,
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
    pub session_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
}

// 手动录入考勤
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub attendance_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub attendance_date: Option<chrono::NaiveDate>,
    pub note: Option<String>,
}

// 考勤列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
    pub session_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
}

// 写入考勤记录（用于存储层，手动录入与扫码签到共用）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub course_id: i64,
    pub session_id: Option<i64>,
    pub attendance_date: chrono::NaiveDate,
    pub status: super::entities::AttendanceStatus,
    pub method: super::entities::AttendanceMethod,
    pub recorded_by: Option<i64>,
    pub checked_in_at: Option<chrono::DateTime<chrono::Utc>>,
    pub note: Option<String>,
}
