use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, check_max_score};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{
        AssignmentListParams, AssignmentListQuery, CreateAssignmentRequest,
        UpdateAssignmentRequest,
    },
};
use crate::services::{bad_request, current_user, error_response, not_found};
use crate::utils::validate::validate_required_text;

pub async fn list_assignments(
    service: &AssignmentService,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        search: query.search,
    };

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve assignment list", e)),
    }
}

pub async fn get_assignment(
    service: &AssignmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_assignment_by_id(id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(error_response("Failed to get assignment", e)),
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    mut req: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.title = req.title.trim().to_string();
    if let Err(msg) = validate_required_text("title", &req.title, 200) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(response) = check_max_score(req.max_score) {
        return Ok(response);
    }

    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_course_by_id(req.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response("Failed to get course", e)),
    }

    match storage.create_assignment(user.id, req).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created for course {} by {}",
                assignment.id, assignment.course_id, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create assignment", e)),
    }
}

pub async fn update_assignment(
    service: &AssignmentService,
    id: i64,
    req: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = req.title
        && let Err(msg) = validate_required_text("title", title, 200)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(response) = check_max_score(req.max_score) {
        return Ok(response);
    }

    let storage = service.get_storage(request)?;

    match storage.update_assignment(id, req).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(error_response("Failed to update assignment", e)),
    }
}

pub async fn delete_assignment(
    service: &AssignmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_assignment(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(error_response("Failed to delete assignment", e)),
    }
}
