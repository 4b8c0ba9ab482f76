use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, users::responses::RoleListResponse};
use crate::services::error_response;

pub async fn list_roles(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_roles().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RoleListResponse { items },
            "Role list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve roles", e)),
    }
}
