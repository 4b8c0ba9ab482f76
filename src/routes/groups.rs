use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{
    AddGroupMemberRequest, CreateGroupRequest, GroupListParams, GroupMemberParams,
    UpdateGroupRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GroupService;
use crate::utils::SafeQueryId;

static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(query.into_inner(), &req).await
}

pub async fn create_group(
    req: HttpRequest,
    body: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(body.into_inner(), &req).await
}

pub async fn update_group(
    req: HttpRequest,
    id: SafeQueryId,
    body: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.update_group(id.0, body.into_inner(), &req).await
}

pub async fn delete_group(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(id.0, &req).await
}

// 成员
pub async fn list_members(
    req: HttpRequest,
    query: web::Query<GroupMemberParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_members(query.into_inner(), &req).await
}

pub async fn add_member(
    req: HttpRequest,
    body: web::Json<AddGroupMemberRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.add_member(body.into_inner(), &req).await
}

pub async fn remove_member(
    req: HttpRequest,
    query: web::Query<GroupMemberParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.remove_member(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_groups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/groups")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_groups),
            )
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .route(web::post().to(create_group))
                    .route(web::put().to(update_group))
                    .route(web::delete().to(delete_group)),
            )
            .service(
                web::resource("/members")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireRole::new_any(UserRole::all_roles()))
                    .to(list_members),
            )
            .service(
                web::resource("/members")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .route(web::post().to(add_member))
                    .route(web::delete().to(remove_member)),
            ),
    );
}
