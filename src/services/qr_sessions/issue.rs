use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{QrSessionService, may_manage_course, session_gone, session_not_found};
use crate::models::{ApiResponse, ErrorCode, qr_sessions::requests::CreateQrSessionRequest};
use crate::services::{bad_request, current_user, error_response, forbidden, not_found};
use crate::utils::qr::{checkin_url, render_svg};
use crate::utils::random_code::generate_checkin_code;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub async fn issue_session(
    service: &QrSessionService,
    req: CreateQrSessionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let ttl = match config.qr.resolve_ttl(req.duration_seconds) {
        Ok(ttl) => ttl,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let course = match storage.get_course_by_id(req.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response("Failed to get course", e)),
    };

    if !may_manage_course(&user, &course) {
        return Ok(forbidden(
            ErrorCode::CoursePermissionDenied,
            "You do not teach this course",
        ));
    }

    let code = generate_checkin_code();
    let expires_at = chrono::Utc::now() + chrono::Duration::seconds(ttl);

    match storage
        .create_qr_session(course.id, user.id, &code, expires_at)
        .await
    {
        Ok(session) => {
            info!(
                "QR session {} issued for course {} by {} ({}s)",
                session.id, course.code, user.username, ttl
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                service.view(session),
                "QR session created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create QR session", e)),
    }
}

pub async fn render_session(
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

    // 过期后不再展示二维码
    if session.is_expired(chrono::Utc::now()) {
        return Ok(session_gone());
    }

    let qr = &service.get_config().qr;
    match render_svg(&checkin_url(&qr.checkin_base_url, &session.code), qr.image_size) {
        Ok(svg) => Ok(HttpResponse::Ok()
            .content_type(SVG_CONTENT_TYPE)
            .body(svg)),
        Err(e) => {
            error!("Failed to render QR session {}: {}", id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::QrRenderFailed,
                    "Failed to render QR code",
                )),
            )
        }
    }
}
