use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::models::users::entities::UserRole;
use crate::services::{AuthService, UserService};

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

pub async fn list_roles(request: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_roles(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/login")
            .wrap(middlewares::RateLimit::login())
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/api/register")
            .wrap(middlewares::RateLimit::register())
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/api/refresh")
            .wrap(middlewares::RateLimit::refresh_token())
            .route(web::post().to(refresh_token)),
    )
    .service(web::resource("/api/logout").route(web::post().to(logout)))
    .service(
        web::resource("/api/me")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(get_user))
            .route(web::put().to(update_profile)),
    )
    .service(
        web::resource("/api/verify-token")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(verify_token)),
    )
    .service(
        web::resource("/api/roles")
            .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(list_roles)),
    );
}
