use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 会话查询参数：id 查单个，course_id 查课程下的会话
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct QrSessionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub id: Option<i64>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct CreateQrSessionRequest {
    pub course_id: i64,
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/qr_session.ts")]
pub struct CheckInRequest {
    pub code: String,
}

// 会话列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct QrSessionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
}
