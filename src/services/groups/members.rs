use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::GroupService;
use crate::models::{
    ApiResponse, ErrorCode,
    groups::requests::{AddGroupMemberRequest, GroupMemberParams},
};
use crate::services::{bad_request, error_response, not_found};
use crate::storage::Storage;

async fn ensure_group(storage: &Arc<dyn Storage>, group_id: i64) -> Result<(), HttpResponse> {
    match storage.get_group_by_id(group_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::GroupNotFound, "Group not found")),
        Err(e) => Err(error_response("Failed to get group", e)),
    }
}

pub async fn list_members(
    service: &GroupService,
    params: GroupMemberParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(group_id) = params.group_id else {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Missing group_id parameter",
        ));
    };

    let storage = service.get_storage(request)?;
    if let Err(response) = ensure_group(&storage, group_id).await {
        return Ok(response);
    }

    match storage.list_group_members(group_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Group members retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve group members", e)),
    }
}

pub async fn add_member(
    service: &GroupService,
    req: AddGroupMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(response) = ensure_group(&storage, req.group_id).await {
        return Ok(response);
    }
    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Ok(error_response("Failed to get user", e)),
    }

    match storage.add_group_member(req.group_id, req.user_id).await {
        Ok(member) => Ok(HttpResponse::Created().json(ApiResponse::success(
            member,
            "Member added successfully",
        ))),
        Err(crate::errors::PortalError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::GroupMemberExists,
                "User is already a member of this group",
            ),
        )),
        Err(e) => Ok(error_response("Failed to add group member", e)),
    }
}

pub async fn remove_member(
    service: &GroupService,
    params: GroupMemberParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (Some(group_id), Some(user_id)) = (params.group_id, params.user_id) else {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Both group_id and user_id are required",
        ));
    };

    let storage = service.get_storage(request)?;

    match storage.remove_group_member(group_id, user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Member removed successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::GroupMemberNotFound,
            "Group member not found",
        )),
        Err(e) => Ok(error_response("Failed to remove group member", e)),
    }
}
