use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeQueryId;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.update_course(id.0, body.into_inner(), &req).await
}

pub async fn delete_course(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(id.0, &req).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_courses),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::academic_admin_roles()))
                    .route(web::post().to(create_course))
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            ),
    );
}
