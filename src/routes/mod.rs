pub mod assignments;
pub mod attendances;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod frontend;
pub mod groups;
pub mod library;
pub mod qr_sessions;
pub mod users;

pub use assignments::configure_assignments_routes;
pub use attendances::configure_attendances_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use dashboard::configure_dashboard_routes;
pub use departments::configure_departments_routes;
pub use frontend::configure_frontend_routes;
pub use groups::configure_groups_routes;
pub use library::configure_library_routes;
pub use qr_sessions::configure_qr_session_routes;
pub use users::configure_user_routes;

use actix_web::{HttpResponse, web};

use crate::models::{ApiResponse, ErrorCode};

async fn api_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
        ErrorCode::NotFound,
        "API endpoint not found",
    ))
}

/// 注册全部 JSON API
///
/// 未匹配的 `/api/*` 请求返回 404 信封，不会落到前端回退页面
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_departments_routes)
        .configure(configure_courses_routes)
        .configure(configure_groups_routes)
        .configure(configure_assignments_routes)
        .configure(configure_attendances_routes)
        .configure(configure_qr_session_routes)
        .configure(configure_library_routes)
        .configure(configure_dashboard_routes)
        .service(web::scope("/api").default_service(web::to(api_not_found)));
}
