use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QrSessionService, load_managed_session, session_not_found};
use crate::models::{
    ApiResponse, PaginatedResponse,
    qr_sessions::{
        requests::{QrSessionListParams, QrSessionListQuery},
        responses::QrSessionView,
    },
};
use crate::services::{current_user, error_response};

pub async fn get_session(
    service: &QrSessionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_qr_session_by_id(id).await {
        Ok(Some(session)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            service.view(session),
            "QR session retrieved successfully",
        ))),
        Ok(None) => Ok(session_not_found()),
        Err(e) => Ok(error_response("Failed to get QR session", e)),
    }
}

pub async fn list_sessions(
    service: &QrSessionService,
    query: QrSessionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = QrSessionListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
    };

    match storage.list_qr_sessions_with_pagination(list_query).await {
        Ok(page) => {
            let response = PaginatedResponse::<QrSessionView> {
                items: page.items.into_iter().map(|s| service.view(s)).collect(),
                pagination: page.pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "QR session list retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to retrieve QR sessions", e)),
    }
}

pub async fn close_session(
    service: &QrSessionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(response) = load_managed_session(&storage, &user, id).await {
        return Ok(response);
    }

    match storage.close_qr_session(id).await {
        Ok(Some(session)) => {
            info!("QR session {} closed by {}", id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                service.view(session),
                "QR session closed successfully",
            )))
        }
        Ok(None) => Ok(session_not_found()),
        Err(e) => Ok(error_response("Failed to close QR session", e)),
    }
}

pub async fn delete_session(
    service: &QrSessionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(response) = load_managed_session(&storage, &user, id).await {
        return Ok(response);
    }

    // 签到记录保留，session_id 置空
    match storage.delete_qr_session(id).await {
        Ok(true) => {
            info!("QR session {} deleted by {}", id, user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "QR session deleted successfully",
            )))
        }
        Ok(false) => Ok(session_not_found()),
        Err(e) => Ok(error_response("Failed to delete QR session", e)),
    }
}
