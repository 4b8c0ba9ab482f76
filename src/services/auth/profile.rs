use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, error_response, invalidate_user_cache};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current_user = current_user(request)?;

    // 邮箱格式与唯一性
    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != current_user.id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(error_response("Failed to update profile", e)),
        }
    }

    let hashed_password = match update_data.password {
        Some(ref password) => {
            if let Err(msg) = validate_password_simple(password) {
                return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(error_response("Failed to update profile", e)),
            }
        }
        None => None,
    };

    // 不包含 role 和 status，普通用户无权修改
    let storage_update = UpdateUserRequest {
        email: update_data.email,
        password: hashed_password,
        display_name: update_data.display_name,
        phone: update_data.phone,
        ..Default::default()
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            invalidate_user_cache(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(crate::services::not_found(
            ErrorCode::UserNotFound,
            "User not found",
        )),
        Err(e) => Ok(error_response("Failed to update profile", e)),
    }
}
