use super::entities::QrCodeSession;
use crate::models::attendances::entities::AttendanceStatus;
use serde::Serialize;
use ts_rs::TS;

// 会话视图，附带倒计时信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct QrSessionView {
    pub session: QrCodeSession,
    pub remaining_seconds: i64,
    pub expired: bool,
    pub checkin_url: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct CheckedInStudent {
    pub attendance_id: i64,
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct PendingStudent {
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
}

// 轮询结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct CheckInsResponse {
    pub session: QrCodeSession,
    pub remaining_seconds: i64,
    pub expired: bool,
    pub roster_size: i64,
    pub checked_in_count: i64,
    pub checked_in: Vec<CheckedInStudent>,
    pub pending: Vec<PendingStudent>,
}
