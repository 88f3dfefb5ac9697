use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::openapi::ApiDoc;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>API Starter</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; }
        code { background: rgba(127, 127, 127, 0.15); padding: 0 0.3rem; border-radius: 3px; }
        @media (prefers-color-scheme: dark) { body { background: #0f172a; color: #e2e8f0; } a { color: #60a5fa; } }
    </style>
</head>
<body>
    <h1>API Starter</h1>
    <h2>Endpoints</h2>
    <ul>
        <li><code>POST /login</code> issues an access and a refresh token</li>
        <li><code>POST /labubu</code> creates a labubu (bearer token)</li>
        <li><code>GET /labubu</code> lists every labubu (bearer token)</li>
        <li><code>GET /labubu/{id}</code> fetches one labubu (bearer token)</li>
        <li><code>GET /health</code> reports process and database status</li>
    </ul>
    <h2>Documentation</h2>
    <ul>
        <li><a href="/docs">Interactive reference</a></li>
        <li><a href="/docs/openapi.json">OpenAPI document</a></li>
    </ul>
</body>
</html>
"#;

const DOCS_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
    <title>API Starter - Reference</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
</head>
<body>
    <elements-api apiDescriptionUrl="/docs/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>
"#;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

async fn docs_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(DOCS_HTML)
}

async fn openapi_json() -> Result<HttpResponse, AppError> {
    let body = ApiDoc::openapi().to_json().map_err(|e| {
        AppError::internal(
            ErrorCode::Internal,
            format!("failed to render OpenAPI document: {e}"),
        )
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/docs", web::get().to(docs_page))
        .route("/docs/openapi.json", web::get().to(openapi_json));
}
