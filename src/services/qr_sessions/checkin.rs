use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QrSessionService, session_gone, session_not_found};
use crate::errors::PortalError;
use crate::models::{
    ApiResponse, ErrorCode,
    attendances::{
        entities::{AttendanceMethod, AttendanceStatus},
        requests::NewAttendance,
    },
    qr_sessions::requests::CheckInRequest,
};
use crate::services::{bad_request, current_user, error_response, forbidden};

fn already_checked_in() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::QrAlreadyCheckedIn,
        "Already checked in for this session",
    ))
}

pub async fn check_in(
    service: &QrSessionService,
    req: CheckInRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let code = req.code.trim();
    if code.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "code is required"));
    }

    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    let session = match storage.get_qr_session_by_code(code).await {
        Ok(Some(session)) => session,
        Ok(None) => return Ok(session_not_found()),
        Err(e) => return Ok(error_response("Failed to get QR session", e)),
    };

    let now = chrono::Utc::now();
    if !session.accepts_checkin(now) {
        info!(
            "Rejected check-in by {} for expired session {}",
            student.username, session.id
        );
        return Ok(session_gone());
    }

    // 必须在课程花名册上
    match storage.list_course_roster(session.course_id).await {
        Ok(roster) if roster.iter().any(|u| u.id == student.id) => {}
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::QrNotOnRoster,
                "You are not enrolled in this course",
            ));
        }
        Err(e) => return Ok(error_response("Failed to load course roster", e)),
    }

    match storage.list_session_attendances(session.id).await {
        Ok(existing) if existing.iter().any(|a| a.student_id == student.id) => {
            return Ok(already_checked_in());
        }
        Ok(_) => {}
        Err(e) => return Ok(error_response("Failed to check in", e)),
    }

    let record = NewAttendance {
        student_id: student.id,
        course_id: session.course_id,
        session_id: Some(session.id),
        attendance_date: now.date_naive(),
        status: AttendanceStatus::Present,
        method: AttendanceMethod::Qr,
        recorded_by: None,
        checked_in_at: Some(now),
        note: None,
    };

    match storage.create_attendance(record).await {
        Ok(attendance) => {
            info!(
                "Student {} checked in to session {}",
                student.username, session.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                attendance,
                "Checked in successfully",
            )))
        }
        // 并发重复签到由唯一约束兜底
        Err(PortalError::Conflict(_)) => Ok(already_checked_in()),
        Err(e) => Ok(error_response("Failed to check in", e)),
    }
}
