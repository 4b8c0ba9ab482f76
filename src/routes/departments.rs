use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{
    DepartmentListParams, CreateDepartmentRequest, UpdateDepartmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::DepartmentService;
use crate::utils::SafeQueryId;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.list_departments(query.into_inner(), &req).await
}

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.create_department(body.into_inner(), &req).await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.update_department(id.0, body.into_inner(), &req).await
}

pub async fn delete_department(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(id.0, &req).await
}

// 配置路由
pub fn configure_departments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/departments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_departments),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_admin_roles()))
                    .route(web::post().to(create_department))
                    .route(web::put().to(update_department))
                    .route(web::delete().to(delete_department)),
            ),
    );
}
