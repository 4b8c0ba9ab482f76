use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentAssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::GradeAssignmentRequest};
use crate::services::{bad_request, current_user, error_response, not_found};

// 分数必须落在 0..=max_score
pub(crate) fn score_in_range(score: f64, max_score: f64) -> bool {
    score.is_finite() && (0.0..=max_score).contains(&score)
}

pub async fn grade_submission(
    service: &StudentAssignmentService,
    id: i64,
    req: GradeAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let grader = current_user(request)?;

    let submission = match storage.get_student_assignment_by_id(id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ));
        }
        Err(e) => return Ok(error_response("Failed to get submission", e)),
    };

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => return Ok(error_response("Failed to get assignment", e)),
    };

    if !score_in_range(req.score, assignment.max_score) {
        return Ok(bad_request(
            ErrorCode::ScoreOutOfRange,
            format!("score must be between 0 and {}", assignment.max_score),
        ));
    }

    match storage
        .grade_student_assignment(id, grader.id, req.score, req.feedback)
        .await
    {
        Ok(Some(graded)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            graded,
            "Submission graded successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        )),
        Err(e) => Ok(error_response("Failed to grade submission", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        assert!(score_in_range(0.0, 100.0));
        assert!(score_in_range(100.0, 100.0));
        assert!(score_in_range(42.5, 50.0));
        assert!(!score_in_range(100.5, 100.0));
        assert!(!score_in_range(-1.0, 100.0));
        assert!(!score_in_range(f64::INFINITY, 100.0));
    }
}
