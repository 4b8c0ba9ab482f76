use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LibraryService, copies_valid};
use crate::models::{
    ApiResponse, ErrorCode,
    library::requests::{
        CreateLibraryResourceRequest, LibraryResourceListParams, LibraryResourceListQuery,
        UpdateLibraryResourceRequest,
    },
};
use crate::services::{bad_request, current_user, error_response, not_found};
use crate::utils::validate::validate_required_text;

const COPIES_MESSAGE: &str = "available_copies must be between 0 and total_copies";

fn resource_not_found() -> HttpResponse {
    not_found(
        ErrorCode::LibraryResourceNotFound,
        "Library resource not found",
    )
}

pub async fn list_resources(
    service: &LibraryService,
    query: LibraryResourceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = LibraryResourceListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        resource_type: query.resource_type,
        search: query.search,
    };

    match storage
        .list_library_resources_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Library resources retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve library resources", e)),
    }
}

pub async fn get_resource(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_library_resource_by_id(id).await {
        Ok(Some(resource)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resource,
            "Library resource retrieved successfully",
        ))),
        Ok(None) => Ok(resource_not_found()),
        Err(e) => Ok(error_response("Failed to get library resource", e)),
    }
}

pub async fn create_resource(
    service: &LibraryService,
    mut req: CreateLibraryResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.title = req.title.trim().to_string();
    if let Err(msg) = validate_required_text("title", &req.title, 300) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let total = req.total_copies.unwrap_or(1);
    let available = req.available_copies.unwrap_or(total);
    if !copies_valid(total, available) {
        return Ok(bad_request(ErrorCode::BadRequest, COPIES_MESSAGE));
    }

    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.create_library_resource(user.id, req).await {
        Ok(resource) => {
            info!("Library resource {} created by {}", resource.id, user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                resource,
                "Library resource created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create library resource", e)),
    }
}

pub async fn update_resource(
    service: &LibraryService,
    id: i64,
    req: UpdateLibraryResourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = req.title
        && let Err(msg) = validate_required_text("title", title, 300)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;

    // 按合并后的副本数校验
    let existing = match storage.get_library_resource_by_id(id).await {
        Ok(Some(resource)) => resource,
        Ok(None) => return Ok(resource_not_found()),
        Err(e) => return Ok(error_response("Failed to get library resource", e)),
    };
    let total = req.total_copies.unwrap_or(existing.total_copies);
    let available = req.available_copies.unwrap_or(existing.available_copies);
    if !copies_valid(total, available) {
        return Ok(bad_request(ErrorCode::BadRequest, COPIES_MESSAGE));
    }

    match storage.update_library_resource(id, req).await {
        Ok(Some(resource)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resource,
            "Library resource updated successfully",
        ))),
        Ok(None) => Ok(resource_not_found()),
        Err(e) => Ok(error_response("Failed to update library resource", e)),
    }
}

pub async fn delete_resource(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_library_resource(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Library resource deleted successfully",
        ))),
        Ok(false) => Ok(resource_not_found()),
        Err(e) => Ok(error_response("Failed to delete library resource", e)),
    }
}
