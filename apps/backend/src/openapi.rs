//! OpenAPI document served at `/docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ProblemDetails;
use crate::routes::health::HealthResponse;
use crate::routes::labubu::{CreateLabubuRequest, LabubuResponse};
use crate::services::auth::LoginResponse;

pub const BEARER_SCHEME: &str = "bearer_auth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access or refresh token issued by POST /login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Starter",
        description = "Token-protected starter API with a single example resource."
    ),
    paths(
        crate::routes::health::health,
        crate::routes::auth::login,
        crate::routes::labubu::create_labubu,
        crate::routes::labubu::list_labubu,
        crate::routes::labubu::get_labubu,
    ),
    components(schemas(
        HealthResponse,
        LoginResponse,
        CreateLabubuRequest,
        LabubuResponse,
        ProblemDetails,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and documentation"),
        (name = "Auth", description = "Token issuance"),
        (name = "Labubu", description = "Example resource, bearer token required")
    )
)]
pub struct ApiDoc;
