use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::{
    ApiResponse, ErrorCode,
    groups::requests::{CreateGroupRequest, GroupListParams, GroupListQuery, UpdateGroupRequest},
};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::validate_required_text;

pub async fn list_groups(
    service: &GroupService,
    query: GroupListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = GroupListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        department_id: query.department_id,
        search: query.search,
    };

    match storage.list_groups_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Group list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve group list", e)),
    }
}

pub async fn get_group(
    service: &GroupService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_group_by_id(id).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group,
            "Group retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(error_response("Failed to get group", e)),
    }
}

pub async fn create_group(
    service: &GroupService,
    mut req: CreateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.name = req.name.trim().to_string();
    if let Err(msg) = validate_required_text("name", &req.name, 100) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.create_group(req).await {
        Ok(group) => {
            info!("Group {} created", group.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                group,
                "Group created successfully",
            )))
        }
        Err(e) => Ok(error_response("Failed to create group", e)),
    }
}

pub async fn update_group(
    service: &GroupService,
    id: i64,
    req: UpdateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref name) = req.name
        && let Err(msg) = validate_required_text("name", name, 100)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.update_group(id, req).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group,
            "Group updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(error_response("Failed to update group", e)),
    }
}

pub async fn delete_group(
    service: &GroupService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_group(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Group deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Ok(error_response("Failed to delete group", e)),
    }
}
