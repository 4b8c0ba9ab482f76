use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_credits, check_teacher};
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::{bad_request, error_response};
use crate::utils::validate::{validate_code, validate_required_text};

pub async fn create_course(
    service: &CourseService,
    mut req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.code = req.code.trim().to_string();
    req.name = req.name.trim().to_string();

    if let Err(msg) = validate_code("code", &req.code) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(msg) = validate_required_text("name", &req.name, 200) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(response) = check_credits(req.credits) {
        return Ok(response);
    }

    let storage = service.get_storage(request)?;
    if let Err(response) = check_teacher(&storage, req.teacher_id).await {
        return Ok(response);
    }

    // 院系不存在时外键约束失败，映射为 400
    match storage.create_course(req).await {
        Ok(course) => {
            info!("Course {} created", course.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create course", e)),
    }
}
