use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, error_response, invalidate_user_cache, not_found};

// 初始管理员账号
const BOOTSTRAP_ADMIN_ID: i64 = 1;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current_user = current_user(request)?;

    // 禁止删除初始管理员和当前用户
    if user_id == current_user.id || user_id == BOOTSTRAP_ADMIN_ID {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete the current user or the bootstrap administrator",
        ));
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            invalidate_user_cache(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(error_response("User deletion failed", e)),
    }
}
