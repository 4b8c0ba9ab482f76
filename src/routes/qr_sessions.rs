use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::qr_sessions::requests::{
    CheckInRequest, CreateQrSessionRequest, QrSessionListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::QrSessionService;
use crate::utils::SafeQueryId;

static QR_SESSION_SERVICE: Lazy<QrSessionService> = Lazy::new(QrSessionService::new_lazy);

pub async fn issue(
    req: HttpRequest,
    body: web::Json<CreateQrSessionRequest>,
) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.issue(body.into_inner(), &req).await
}

pub async fn list_sessions(
    req: HttpRequest,
    query: web::Query<QrSessionListParams>,
) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE
        .list_sessions(query.into_inner(), &req)
        .await
}

pub async fn delete_session(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.delete(id.0, &req).await
}

pub async fn render(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.render(id.0, &req).await
}

pub async fn check_in(
    req: HttpRequest,
    body: web::Json<CheckInRequest>,
) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.check_in(body.into_inner(), &req).await
}

pub async fn poll(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.poll(id.0, &req).await
}

pub async fn close(req: HttpRequest, id: SafeQueryId) -> ActixResult<HttpResponse> {
    QR_SESSION_SERVICE.close(id.0, &req).await
}

// 配置路由
//
// 签到接口在 JWT 之后按用户限流
pub fn configure_qr_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/qr-codesession")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/checkin")
                    .wrap(middlewares::RateLimit::qr_checkin())
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route(web::post().to(check_in)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::instructor_roles(),
                    ))
                    .service(
                        web::resource("")
                            .route(web::post().to(issue))
                            .route(web::get().to(list_sessions))
                            .route(web::delete().to(delete_session)),
                    )
                    .service(web::resource("/qr").guard(guard::Get()).to(render))
                    .service(web::resource("/checkins").guard(guard::Get()).to(poll))
                    .service(web::resource("/close").guard(guard::Post()).to(close)),
            ),
    );
}
