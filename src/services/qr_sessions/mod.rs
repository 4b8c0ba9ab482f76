//! 扫码签到会话
//!
//! 教师为课程签发限时签到码，学生扫码签到，教师端轮询签到进度。
//! 会话在 `expires_at` 之后或被手动关闭后不再接受签到。

pub mod checkin;
pub mod issue;
pub mod manage;
pub mod poll;
pub mod reconcile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::courses::entities::Course;
use crate::models::qr_sessions::{
    entities::QrCodeSession,
    requests::{CheckInRequest, CreateQrSessionRequest, QrSessionListParams},
    responses::QrSessionView,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::qr::checkin_url;

pub struct QrSessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QrSessionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 签发签到码
    pub async fn issue(
        &self,
        req: CreateQrSessionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        issue::issue_session(self, req, request).await
    }

    // 单个会话或课程下的会话列表
    pub async fn list_sessions(
        &self,
        query: QrSessionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => manage::get_session(self, id, request).await,
            None => manage::list_sessions(self, query, request).await,
        }
    }

    // 渲染二维码
    pub async fn render(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        issue::render_session(self, id, request).await
    }

    // 学生签到
    pub async fn check_in(
        &self,
        req: CheckInRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        checkin::check_in(self, req, request).await
    }

    // 轮询签到进度
    pub async fn poll(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        poll::poll_checkins(self, id, request).await
    }

    pub async fn close(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::close_session(self, id, request).await
    }

    pub async fn delete(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_session(self, id, request).await
    }

    pub(crate) fn view(&self, session: QrCodeSession) -> QrSessionView {
        let now = chrono::Utc::now();
        QrSessionView {
            remaining_seconds: session.remaining_seconds(now),
            expired: session.is_expired(now),
            checkin_url: checkin_url(&self.get_config().qr.checkin_base_url, &session.code),
            session,
        }
    }
}

/// 管理员和院系可以管理任意课程的签到，教师只能管理自己授课的课程
pub(crate) fn may_manage_course(user: &User, course: &Course) -> bool {
    match user.role {
        UserRole::Admin | UserRole::Faculty => true,
        UserRole::Teacher => course.teacher_id == Some(user.id),
        UserRole::Hr | UserRole::Student => false,
    }
}

pub(crate) fn session_gone() -> HttpResponse {
    HttpResponse::Gone().json(ApiResponse::error_empty(
        ErrorCode::QrSessionExpired,
        "QR session has expired or been closed",
    ))
}

pub(crate) fn session_not_found() -> HttpResponse {
    super::not_found(ErrorCode::QrSessionNotFound, "QR session not found")
}

// 读取会话及其课程，并校验当前用户是否有权管理
pub(crate) async fn load_managed_session(
    storage: &Arc<dyn Storage>,
    user: &User,
    id: i64,
) -> Result<QrCodeSession, HttpResponse> {
    let session = match storage.get_qr_session_by_id(id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Err(session_not_found()),
        Err(e) => return Err(super::error_response("Failed to get QR session", e)),
    };
    let course = match storage.get_course_by_id(session.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(super::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Err(super::error_response("Failed to get course", e)),
    };
    if !may_manage_course(user, &course) {
        return Err(super::forbidden(
            ErrorCode::CoursePermissionDenied,
            "You do not teach this course",
        ));
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@campus.edu"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            phone: None,
            department_id: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn course(teacher_id: Option<i64>) -> Course {
        let now = chrono::Utc::now();
        Course {
            id: 1,
            department_id: 1,
            teacher_id,
            code: "CS101".into(),
            name: "Intro".into(),
            description: None,
            credits: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_course_management_rights() {
        let taught = course(Some(10));
        assert!(may_manage_course(&user(10, UserRole::Teacher), &taught));
        assert!(!may_manage_course(&user(11, UserRole::Teacher), &taught));
        assert!(!may_manage_course(&user(12, UserRole::Teacher), &course(None)));
        assert!(may_manage_course(&user(1, UserRole::Admin), &taught));
        assert!(may_manage_course(&user(2, UserRole::Faculty), &taught));
        assert!(!may_manage_course(&user(3, UserRole::Hr), &taught));
        assert!(!may_manage_course(&user(4, UserRole::Student), &taught));
    }
}
