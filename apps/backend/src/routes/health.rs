use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::require_db;
use crate::state::app_state::AppState;

/// Liveness report. `status` stays "ok" while the process serves requests;
/// storage problems show up in `db` and `db_error` only.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app_version: &'static str,
    pub db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_error: Option<String>,
    pub migrations: String,
    pub time: String,
}

const DB_QUERY_FAILED: &str = "database query failed";
const DB_UNAVAILABLE: &str = "database unavailable";

struct DbStatus {
    error: Option<String>,
    migrations: String,
}

impl DbStatus {
    fn failed(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            migrations: "unknown".to_string(),
        }
    }
}

async fn check_db(db: &DatabaseConnection) -> DbStatus {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1 AS health_check");
    if let Err(e) = db.query_one(ping).await {
        warn!(error = %e, "health check query failed");
        return DbStatus::failed(DB_QUERY_FAILED);
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    DbStatus {
        error: None,
        migrations,
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is up; see `db` for storage state", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let db_status = match require_db(&app_state) {
        Ok(db) => check_db(db).await,
        Err(_) => DbStatus::failed(DB_UNAVAILABLE),
    };

    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: if db_status.error.is_none() { "ok" } else { "error" },
        db_error: db_status.error,
        migrations: db_status.migrations,
        time,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
