use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    departments::requests::{DepartmentListParams, DepartmentListQuery},
};
use crate::services::{error_response, not_found};

pub async fn list_departments(
    service: &DepartmentService,
    query: DepartmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = DepartmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    match storage.list_departments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Department list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve department list", e)),
    }
}

pub async fn get_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_department_by_id(id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )),
        Err(e) => Ok(error_response("Failed to get department", e)),
    }
}
