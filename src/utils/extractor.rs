//! 安全的查询参数提取器
//!
//! 资源标识统一通过查询串传递（`?id=42`），解析失败时直接返回 400 信封，
//! 不会进入处理函数。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::StatusCode,
    web,
};
use futures_util::future::{Ready, ready};
use serde::Deserialize;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// `?id=` 中的正整数 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeQueryId(pub i64);

fn bad_request(message: &str) -> actix_web::Error {
    let response = HttpResponse::build(StatusCode::BAD_REQUEST)
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(message.to_string(), response).into()
}

pub(crate) fn parse_id(raw: Option<&str>) -> Result<i64, &'static str> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or("Missing id parameter")?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("Invalid id parameter: must be a positive integer"),
    }
}

impl FromRequest for SafeQueryId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = web::Query::<IdQuery>::from_query(req.query_string())
            .map_err(|_| bad_request("Invalid query string"))
            .and_then(|query| {
                parse_id(query.id.as_deref())
                    .map(SafeQueryId)
                    .map_err(bad_request)
            });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("42")), Ok(42));
        assert_eq!(parse_id(Some(" 7 ")), Ok(7));
        assert!(parse_id(None).is_err());
        assert!(parse_id(Some("")).is_err());
        assert!(parse_id(Some("0")).is_err());
        assert!(parse_id(Some("-3")).is_err());
        assert!(parse_id(Some("abc")).is_err());
    }

    #[actix_web::test]
    async fn test_extract_from_query_string() {
        let req = TestRequest::with_uri("/api/courses?id=12&page=1").to_http_request();
        let id = SafeQueryId::extract(&req).await.unwrap();
        assert_eq!(id, SafeQueryId(12));

        let req = TestRequest::with_uri("/api/courses").to_http_request();
        let err = SafeQueryId::extract(&req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
