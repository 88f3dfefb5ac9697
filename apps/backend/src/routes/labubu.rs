//! `/labubu` handlers. Mounted behind [`BearerAuth`](crate::middleware::BearerAuth).

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::{AppError, ProblemDetails};
use crate::errors::ErrorCode;
use crate::extractors::{ValidatedJson, VerifiedClaims};
use crate::repos::labubu::Labubu;
use crate::services::labubu as labubu_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLabubuRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LabubuResponse {
    pub id: i64,
    pub text: String,
}

impl From<Labubu> for LabubuResponse {
    fn from(value: Labubu) -> Self {
        Self {
            id: value.id,
            text: value.text,
        }
    }
}

fn parse_labubu_id(raw: &str) -> Result<i64, AppError> {
    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidLabubuId, format!("Invalid labubu id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidLabubuId,
            format!("Labubu id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

#[utoipa::path(
    post,
    path = "/labubu",
    request_body = CreateLabubuRequest,
    responses(
        (status = 200, description = "Created", body = LabubuResponse),
        (status = 400, description = "Empty text or malformed body", body = ProblemDetails, content_type = "application/problem+json"),
        (status = 401, description = "Missing or rejected bearer token", body = String, content_type = "text/plain")
    ),
    security(("bearer_auth" = [])),
    tag = "Labubu"
)]
pub async fn create_labubu(
    claims: VerifiedClaims,
    body: ValidatedJson<CreateLabubuRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().text;
    debug!(token_id = %claims.jti, "create labubu");

    let created = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(labubu_service::create_labubu(txn, &text).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(LabubuResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/labubu",
    responses(
        (status = 200, description = "Every labubu, ordered by id", body = [LabubuResponse]),
        (status = 401, description = "Missing or rejected bearer token", body = String, content_type = "text/plain")
    ),
    security(("bearer_auth" = [])),
    tag = "Labubu"
)]
pub async fn list_labubu(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let all = labubu_service::list_labubu(db).await?;

    let body: Vec<LabubuResponse> = all.into_iter().map(LabubuResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/labubu/{id}",
    params(("id" = i64, Path, description = "Labubu id")),
    responses(
        (status = 200, description = "Found", body = LabubuResponse),
        (status = 400, description = "Id is not a positive integer", body = ProblemDetails, content_type = "application/problem+json"),
        (status = 401, description = "Missing or rejected bearer token", body = String, content_type = "text/plain"),
        (status = 404, description = "No labubu with this id", body = ProblemDetails, content_type = "application/problem+json")
    ),
    security(("bearer_auth" = [])),
    tag = "Labubu"
)]
pub async fn get_labubu(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_labubu_id(&path)?;
    let db = require_db(&app_state)?;
    let found = labubu_service::get_labubu(db, id).await?;

    Ok(HttpResponse::Ok().json(LabubuResponse::from(found)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_labubu))
            .route(web::get().to(list_labubu)),
    )
    .service(web::resource("/{id}").route(web::get().to(get_labubu)));
}
