#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{AuthError, Claims, JwtTokens, TokenKind, TokenProvider};
pub use config::{AppConfig, AppEnv};
pub use error::{AppError, ProblemDetails};
pub use errors::{DomainError, ErrorCode};
pub use extractors::{ValidatedJson, VerifiedClaims};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{BearerAuth, RequestTrace, StructuredLogger, TraceSpan};
pub use services::auth::{AuthService, LoginResponse};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
