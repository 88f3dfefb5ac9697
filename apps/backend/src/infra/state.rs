use std::sync::Arc;

use crate::auth::{JwtTokens, TokenProvider};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::auth::AuthService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    database_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to and migrate this database during `build`.
    pub fn with_db(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    /// Sign and verify tokens as JWTs with these settings.
    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    /// Use this provider instead of building one from the security config.
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let tokens: Arc<dyn TokenProvider> = match (self.token_provider, self.security_config) {
            (Some(provider), _) => provider,
            (None, Some(security)) => Arc::new(JwtTokens::new(security)),
            (None, None) => {
                return Err(AppError::config(
                    "state needs a security config or a token provider",
                ))
            }
        };
        let auth = AuthService::new(tokens);

        match self.database_url {
            Some(url) => {
                let conn = bootstrap_db(&url).await?;
                Ok(AppState::new(conn, auth))
            }
            None => Ok(AppState::new_without_db(auth)),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
