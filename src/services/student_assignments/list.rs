use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentAssignmentService;
use crate::models::{
    ApiResponse,
    assignments::requests::{StudentAssignmentListParams, StudentAssignmentListQuery},
    users::entities::UserRole,
};
use crate::services::{current_user, error_response};

pub async fn list_submissions(
    service: &StudentAssignmentService,
    query: StudentAssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 学生只能看到自己的提交
    let student_id = if user.role == UserRole::Student {
        Some(user.id)
    } else {
        query.student_id
    };

    let list_query = StudentAssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        assignment_id: query.assignment_id,
        student_id,
        status: query.status,
    };

    match storage
        .list_student_assignments_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve submissions", e)),
    }
}
