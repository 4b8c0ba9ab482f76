/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户是否具有特定角色权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{guard, web, App};
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::UserRole;
 *
 * App::new().service(
 *     web::scope("/api/users")
 *         .wrap(RequireJWT)  // 先验证JWT
 *         .service(
 *             web::resource("")
 *                 .guard(guard::Post())
 *                 .wrap(RequireRole::new_any(UserRole::management_roles()))  // 任一角色即可
 *                 .to(create_user),
 *         ),
 * );
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::RequireJWT,
    models::{ErrorCode, users::entities::UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    require_all: bool, // true表示需要所有角色，false表示任一角色即可
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![role.clone()],
            require_all: true,
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| (*r).clone()).collect(),
            require_all: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            let user_role = RequireJWT::extract_user_role(req.request());
            let user_id = RequireJWT::extract_user_id(req.request());

            match user_id {
                Some(user_sub) => {
                    let has_permission = if require_all {
                        // 需要所有角色（通常用于单一角色验证）
                        required_roles
                            .iter()
                            .all(|role| user_role.as_ref() == Some(role))
                    } else {
                        // 需要任一角色
                        required_roles
                            .iter()
                            .any(|role| user_role.as_ref() == Some(role))
                    };

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {:?}). Required roles: {:?}",
                            user_sub, user_role, required_roles
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied: insufficient role",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: No user claims found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{User, UserStatus};
    use actix_web::{App, HttpMessage, HttpResponse, test, web};

    fn user_with(role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id: 42,
            username: "tester".into(),
            email: "tester@example.com".into(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            phone: None,
            department_id: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn test_any_role_guard() {
        for (role, expected) in [
            (UserRole::Teacher, 200),
            (UserRole::Faculty, 200),
            (UserRole::Student, 403),
            (UserRole::Hr, 403),
        ] {
            let app = test::init_service(
                App::new().service(
                    web::resource("/guarded")
                        .wrap(RequireRole::new_any(UserRole::instructor_roles()))
                        .wrap_fn(move |req, srv| {
                            req.extensions_mut().insert(user_with(role.clone()));
                            srv.call(req)
                        })
                        .route(web::get().to(HttpResponse::Ok)),
                ),
            )
            .await;

            let resp =
                test::call_service(&app, test::TestRequest::get().uri("/guarded").to_request())
                    .await;
            assert_eq!(resp.status().as_u16(), expected);
        }
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::resource("/guarded")
                    .wrap(RequireRole::new(&UserRole::Student))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/guarded").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
