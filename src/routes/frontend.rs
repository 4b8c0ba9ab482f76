//! 前端静态资源路由
//!
//! 前端构建产物在编译时通过 rust-embed 嵌入二进制。
//! `./frontend-custom/` 下的同名文件优先于嵌入资源，未命中的路径回退到 index.html。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::{Component, Path};

const INDEX_HTML: &str = "index.html";
const CUSTOM_DIR: &str = "./frontend-custom";

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn content_type_for(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

// 打包产物文件名带 hash，可以长期缓存；入口页面每次都要重新取
fn cache_control_for(path: &str) -> &'static str {
    match extension(path) {
        "js" | "mjs" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif"
        | "svg" | "webp" => "public, max-age=31536000, immutable",
        _ => "no-cache, no-store, must-revalidate",
    }
}

// 只接受普通的相对路径，拒绝 `..` 和绝对路径
fn is_safe_path(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    if !is_safe_path(path) {
        return None;
    }
    if let Ok(data) = std::fs::read(Path::new(CUSTOM_DIR).join(path)) {
        return Some(Cow::Owned(data));
    }
    FrontendAssets::get(path).map(|f| f.data)
}

// 返回实际命中的文件路径与内容
fn resolve(path: &str) -> Option<(&str, Cow<'static, [u8]>)> {
    if !path.is_empty()
        && let Some(data) = load_asset(path)
    {
        return Some((path, data));
    }
    load_asset(INDEX_HTML).map(|data| (INDEX_HTML, data))
}

const MISSING_FRONTEND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Campus Portal</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The frontend assets have not been built or embedded.</p>
    <p>The JSON API is available under <code>/api</code>.</p>
</body>
</html>"#;

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    match resolve(path) {
        Some((file, data)) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(file))
            .insert_header(("Cache-Control", cache_control_for(file)))
            .body(data.into_owned())),
        None => Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(MISSING_FRONTEND_PAGE)),
    }
}

/// 所有未被 API 匹配的 GET 请求都交给前端
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            content_type_for("assets/app.mjs"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type_for("qr.svg"), "image/svg+xml");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn test_cache_control_for() {
        assert!(cache_control_for("assets/index-3f2a.js").contains("immutable"));
        assert!(cache_control_for("index.html").starts_with("no-cache"));
        assert!(cache_control_for("manifest.webmanifest").starts_with("no-cache"));
    }

    #[test]
    fn test_is_safe_path() {
        assert!(is_safe_path("assets/app.js"));
        assert!(!is_safe_path("../config.toml"));
        assert!(!is_safe_path("/etc/passwd"));
        assert!(!is_safe_path("assets/../../secret"));
    }
}
