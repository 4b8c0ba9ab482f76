use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{DepartmentService, check_head_exists};
use crate::models::{ApiResponse, ErrorCode, departments::requests::CreateDepartmentRequest};
use crate::services::{bad_request, error_response};
use crate::utils::validate::{validate_code, validate_required_text};

pub async fn create_department(
    service: &DepartmentService,
    mut req: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.name = req.name.trim().to_string();
    req.code = req.code.trim().to_string();

    if let Err(msg) = validate_required_text("name", &req.name, 100) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if let Err(msg) = validate_code("code", &req.code) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    if let Err(response) = check_head_exists(&storage, req.head_id).await {
        return Ok(response);
    }

    match storage.create_department(req).await {
        Ok(department) => {
            info!("Department {} created", department.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create department", e)),
    }
}
