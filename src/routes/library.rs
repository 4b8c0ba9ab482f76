use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::library::requests::{
    LibraryResourceListParams, CreateLibraryResourceRequest, UpdateLibraryResourceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LibraryService;
use crate::utils::SafeQueryId;

static LIBRARY_SERVICE: Lazy<LibraryService> = Lazy::new(LibraryService::new_lazy);

pub async fn list_resources(
    req: HttpRequest,
    query: web::Query<LibraryResourceListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_resources(query.into_inner(), &req).await
}

pub async fn create_resource(
    req: HttpRequest,
    body: web::Json<CreateLibraryResourceRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.create_resource(body.into_inner(), &req).await
}

pub async fn update_resource(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateLibraryResourceRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.update_resource(id.0, body.into_inner(), &req).await
}

pub async fn delete_resource(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.delete_resource(id.0, &req).await
}

// 配置路由
pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/library-resources")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_resources),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles()))
                    .route(web::post().to(create_resource))
                    .route(web::put().to(update_resource))
                    .route(web::delete().to(delete_resource)),
            ),
    );
}
