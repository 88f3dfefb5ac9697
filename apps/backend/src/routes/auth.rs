use actix_web::{web, HttpResponse};

use crate::error::{AppError, ProblemDetails};
use crate::services::auth::LoginResponse;
use crate::state::app_state::AppState;

/// Issue a fresh access/refresh token pair.
///
/// No credentials are checked; any caller receives tokens.
#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Token pair issued", body = LoginResponse),
        (status = 500, description = "Token generation failed", body = ProblemDetails, content_type = "application/problem+json")
    ),
    tag = "Auth"
)]
pub async fn login(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tokens = app_state.auth.login()?;
    Ok(HttpResponse::Ok().json(tokens))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
