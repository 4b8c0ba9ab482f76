use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_credits, check_teacher};
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::{validate_code, validate_required_text};

pub async fn update_course(
    service: &CourseService,
    id: i64,
    req: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref code) = req.code
        && let Err(msg) = validate_code("code", code)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Some(ref name) = req.name
        && let Err(msg) = validate_required_text("name", name, 200)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(response) = check_credits(req.credits) {
        return Ok(response);
    }

    let storage = service.get_storage(request)?;
    if let Err(response) = check_teacher(&storage, req.teacher_id).await {
        return Ok(response);
    }

    match storage.update_course(id, req).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(error_response("Failed to update course", e)),
    }
}
