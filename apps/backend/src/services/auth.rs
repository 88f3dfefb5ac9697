//! Login and token verification on top of a [`TokenProvider`].

use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::auth::{AuthError, Claims, TokenKind, TokenProvider};

/// The token pair returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    tokens: Arc<dyn TokenProvider>,
}

impl AuthService {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self { tokens }
    }

    /// Issue an access/refresh pair.
    ///
    /// No credential is checked: the endpoint is an open token vending
    /// point until an identity source is wired in.
    pub fn login(&self) -> Result<LoginResponse, AuthError> {
        self.login_at(SystemTime::now())
    }

    pub fn login_at(&self, now: SystemTime) -> Result<LoginResponse, AuthError> {
        let access_token = self.tokens.generate(TokenKind::Access, now)?;
        let refresh_token = self.tokens.generate(TokenKind::Refresh, now)?;

        info!("issued access and refresh tokens");

        Ok(LoginResponse {
            access_token,
            refresh_token,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_token_at(token, SystemTime::now())
    }

    pub fn verify_token_at(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        self.tokens.verify(token, now)
    }
}
