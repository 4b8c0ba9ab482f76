use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// 考勤汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub excused: i64,
    // (present + late) / total，保留 4 位小数
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RoleCount {
    pub role: UserRole,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DepartmentCourseCount {
    pub department_id: i64,
    pub department_name: String,
    pub course_count: i64,
}

/// 管理员仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminStats {
    pub total_users: i64,
    pub users_by_role: Vec<RoleCount>,
    pub departments: i64,
    pub courses: i64,
    pub groups: i64,
    pub active_qr_sessions: i64,
    pub attendance: AttendanceSummary,
}

/// 院系仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct FacultyStats {
    pub departments: i64,
    pub courses: i64,
    pub courses_per_department: Vec<DepartmentCourseCount>,
    pub teachers: i64,
    pub students: i64,
    pub attendance: AttendanceSummary,
}

/// 人事仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct HrStats {
    pub total_staff: i64,
    pub staff_by_role: Vec<RoleCount>,
    pub active_users: i64,
    pub inactive_users: i64,
    pub recent_users: i64,
    pub recent_days: i64,
}

/// 教师仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherStats {
    pub courses: i64,
    pub groups: i64,
    pub students: i64,
    pub pending_grading: i64,
    pub active_qr_sessions: i64,
    pub attendance: AttendanceSummary,
}

/// 学生仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentStats {
    pub enrolled_courses: i64,
    pub pending_assignments: i64,
    pub graded_submissions: i64,
    // 已批改作业的平均得分率（百分比），无成绩时为空
    pub average_score_percent: Option<f64>,
    pub attendance: AttendanceSummary,
}

/// 仪表盘响应：`{ role, stats }`
#[derive(Debug, Serialize, TS)]
#[serde(tag = "role", content = "stats", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Admin(AdminStats),
    Faculty(FacultyStats),
    Hr(HrStats),
    Teacher(TeacherStats),
    Student(StudentStats),
}
