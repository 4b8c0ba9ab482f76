use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentAssignmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{entities::SubmissionStatus, requests::SubmitAssignmentRequest},
};
use crate::services::{current_user, error_response, not_found};

pub async fn submit_assignment(
    service: &StudentAssignmentService,
    req: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    match storage.get_assignment_by_id(req.assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => return Ok(error_response("Failed to get assignment", e)),
    }

    // 已批改的提交不允许覆盖
    match storage
        .get_student_assignment(req.assignment_id, student.id)
        .await
    {
        Ok(Some(existing)) if existing.status == SubmissionStatus::Graded => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyGraded,
                "Submission has already been graded",
            )));
        }
        Ok(_) => {}
        Err(e) => return Ok(error_response("Failed to submit assignment", e)),
    }

    match storage
        .upsert_student_assignment(req.assignment_id, student.id, req.content)
        .await
    {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {} (late: {})",
                student.username, submission.assignment_id, submission.is_late
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Assignment submitted successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to submit assignment", e)),
    }
}
