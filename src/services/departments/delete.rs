use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn delete_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_department(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Department deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )),
        Err(e) => Ok(error_response("Failed to delete department", e)),
    }
}
