use actix_web::web;

use crate::middleware::BearerAuth;

pub mod auth;
pub mod docs;
pub mod health;
pub mod labubu;

/// Register every route.
///
/// Public: `/`, `/health`, `/docs`, `/docs/openapi.json`, `POST /login`.
/// Everything under `/labubu` sits behind [`BearerAuth`]. Request tracing and
/// logging middleware are applied by the caller around the whole app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(docs::configure_routes)
        .configure(health::configure_routes)
        .configure(auth::configure_routes);

    cfg.service(
        web::scope("/labubu")
            .wrap(BearerAuth)
            .configure(labubu::configure_routes),
    );
}
