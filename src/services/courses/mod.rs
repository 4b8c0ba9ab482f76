pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

// 学分范围
pub(crate) const CREDITS_RANGE: std::ops::RangeInclusive<i32> = 0..=30;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match query.id {
            Some(id) => list::get_course(self, id, request).await,
            None => list::list_courses(self, query, request).await,
        }
    }

    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        req: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, req, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, id, request).await
    }
}

pub(crate) fn check_credits(credits: Option<i32>) -> Result<(), HttpResponse> {
    match credits {
        Some(value) if !CREDITS_RANGE.contains(&value) => Err(super::bad_request(
            ErrorCode::BadRequest,
            format!(
                "credits must be between {} and {}",
                CREDITS_RANGE.start(),
                CREDITS_RANGE.end()
            ),
        )),
        _ => Ok(()),
    }
}

// 授课教师必须存在且为教师或院系角色
pub(crate) async fn check_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(teacher_id) = teacher_id else {
        return Ok(());
    };
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if matches!(user.role, UserRole::Teacher | UserRole::Faculty) => Ok(()),
        Ok(Some(_)) => Err(super::bad_request(
            ErrorCode::BadRequest,
            format!("User {teacher_id} is not a teacher"),
        )),
        Ok(None) => Err(super::bad_request(
            ErrorCode::UserNotFound,
            format!("Teacher {teacher_id} does not exist"),
        )),
        Err(e) => Err(super::error_response("Failed to check teacher", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_bounds() {
        assert!(check_credits(None).is_ok());
        assert!(check_credits(Some(0)).is_ok());
        assert!(check_credits(Some(30)).is_ok());
        assert!(check_credits(Some(31)).is_err());
        assert!(check_credits(Some(-1)).is_err());
    }
}
