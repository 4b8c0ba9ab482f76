pub mod assignments;
pub mod attendances;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod groups;
pub mod library;
pub mod qr_sessions;
pub mod student_assignments;
pub mod users;

pub use assignments::AssignmentService;
pub use attendances::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use departments::DepartmentService;
pub use groups::GroupService;
pub use library::LibraryService;
pub use qr_sessions::QrSessionService;
pub use student_assignments::StudentAssignmentService;
pub use users::UserService;

use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, http::StatusCode, web,
};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|storage| storage.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not found in app data")
        })
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|cache| cache.get_ref().clone())
}

// 用户信息变更后清除 RequireJWT 的用户缓存
pub(crate) async fn invalidate_user_cache(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = cache_from_request(request) {
        cache
            .remove(&crate::middlewares::require_jwt::user_cache_key(user_id))
            .await;
    }
}

// 当前登录用户，由 RequireJWT 写入请求扩展
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        let response = HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ));
        InternalError::from_response("missing user", response).into()
    })
}

/// 错误类型到 HTTP 状态和业务码的映射
pub(crate) fn error_status(err: &PortalError) -> (StatusCode, ErrorCode) {
    match err {
        PortalError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        PortalError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        PortalError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        PortalError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        PortalError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 将存储层错误转换为错误信封
pub(crate) fn error_response(action: &str, err: PortalError) -> HttpResponse {
    let (status, code) = error_status(&err);
    if status.is_server_error() {
        error!("{}: {}", action, err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(
        code,
        format!("{action}: {}", err.message()),
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&PortalError::validation("x")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&PortalError::not_found("x")).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&PortalError::conflict("x")),
            (StatusCode::CONFLICT, ErrorCode::Conflict)
        );
        assert_eq!(
            error_status(&PortalError::authorization("x")).0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_status(&PortalError::database_operation("x")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_response_envelope() {
        let response = error_response("Failed to create course", PortalError::conflict("code taken"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::Conflict as i32);
        assert_eq!(json["error"], "Failed to create course: code taken");
    }
}
