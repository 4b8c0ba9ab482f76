use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DepartmentService, check_head_exists};
use crate::models::{ApiResponse, ErrorCode, departments::requests::UpdateDepartmentRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::{validate_code, validate_required_text};

pub async fn update_department(
    service: &DepartmentService,
    id: i64,
    req: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref name) = req.name
        && let Err(msg) = validate_required_text("name", name, 100)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Some(ref code) = req.code
        && let Err(msg) = validate_code("code", code)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    if let Err(response) = check_head_exists(&storage, req.head_id).await {
        return Ok(response);
    }

    match storage.update_department(id, req).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )),
        Err(e) => Ok(error_response("Failed to update department", e)),
    }
}
