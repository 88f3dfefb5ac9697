#![allow(dead_code)]

pub mod app_builder;
pub mod tokens;

use std::sync::Arc;

use api_starter::auth::TokenProvider;
use api_starter::error::AppError;
use api_starter::infra::state::build_state;
use api_starter::state::app_state::AppState;

pub use app_builder::create_test_app;
pub use tokens::{bearer, test_security, CountingTokens, TEST_SECRET};

pub const MEMORY_DB: &str = "sqlite::memory:";

/// State over a fresh, migrated in-memory SQLite database.
pub async fn test_state() -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state()
        .with_security(test_security())
        .with_db(MEMORY_DB)
        .build()
        .await
}

/// Same as [`test_state`] but with a caller-supplied token provider.
pub async fn test_state_with_tokens(tokens: Arc<dyn TokenProvider>) -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state()
        .with_token_provider(tokens)
        .with_db(MEMORY_DB)
        .build()
        .await
}

/// State with no database; storage-backed handlers answer 503.
pub async fn test_state_without_db() -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state().with_security(test_security()).build().await
}
