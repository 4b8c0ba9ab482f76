use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{QrSessionService, reconcile::reconcile, session_not_found};
use crate::models::{ApiResponse, qr_sessions::responses::CheckInsResponse};
use crate::services::error_response;

/// 只读轮询，重复调用没有副作用
pub async fn poll_checkins(
    service: &QrSessionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let session = match storage.get_qr_session_by_id(id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Ok(session_not_found()),
        Err(e) => return Ok(error_response("Failed to get QR session", e)),
    };

    let roster = match storage.list_course_roster(session.course_id).await {
        Ok(roster) => roster,
        Err(e) => return Ok(error_response("Failed to load course roster", e)),
    };
    let attendances = match storage.list_session_attendances(session.id).await {
        Ok(attendances) => attendances,
        Err(e) => return Ok(error_response("Failed to load check-ins", e)),
    };

    let mut directory: HashMap<i64, _> = roster.iter().map(|u| (u.id, u.clone())).collect();
    for attendance in &attendances {
        if directory.contains_key(&attendance.student_id) {
            continue;
        }
        match storage.get_user_by_id(attendance.student_id).await {
            Ok(Some(user)) => {
                directory.insert(user.id, user);
            }
            Ok(None) => {}
            Err(e) => return Ok(error_response("Failed to load student", e)),
        }
    }

    let (checked_in, pending) = reconcile(&roster, &attendances, &directory);
    let now = chrono::Utc::now();

    let response = CheckInsResponse {
        remaining_seconds: session.remaining_seconds(now),
        expired: session.is_expired(now),
        roster_size: roster.len() as i64,
        checked_in_count: checked_in.len() as i64,
        checked_in,
        pending,
        session,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Check-ins retrieved successfully",
    )))
}
