use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendances::requests::{
    AttendanceListParams, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeQueryId;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendances(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list_attendances(query.into_inner(), &req).await
}

pub async fn create_attendance(
    req: HttpRequest,
    body: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.create_attendance(body.into_inner(), &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.update_attendance(id.0, body.into_inner(), &req).await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(id.0, &req).await
}

// 配置路由
pub fn configure_attendances_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendances")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_attendances),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
                    .route(web::post().to(create_attendance))
                    .route(web::put().to(update_attendance))
                    .route(web::delete().to(delete_attendance)),
            ),
    );
}
