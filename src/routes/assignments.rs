use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, GradeAssignmentRequest,
    StudentAssignmentListParams, SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, StudentAssignmentService};
use crate::utils::SafeQueryId;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static STUDENT_ASSIGNMENT_SERVICE: Lazy<StudentAssignmentService> =
    Lazy::new(StudentAssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(query.into_inner(), &req)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(body.into_inner(), &req)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(id.0, &req).await
}

// 学生提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<StudentAssignmentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn submit(
    req: HttpRequest,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .submit(body.into_inner(), &req)
        .await
}

pub async fn grade(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<GradeAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_ASSIGNMENT_SERVICE
        .grade(id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_assignments),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .route(web::post().to(create_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            ),
    )
    .service(
        web::scope("/api/student-assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_submissions),
            )
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .to(submit),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .route(web::put().to(grade)),
            ),
    );
}
