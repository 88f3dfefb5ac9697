use std::fmt::Debug;
use std::time::SystemTime;

use super::claims::{Claims, TokenKind};
use super::error::AuthError;

/// Issues and verifies bearer tokens.
///
/// Both operations take the clock explicitly so verification is a pure
/// function of (token, secret, now).
pub trait TokenProvider: Send + Sync + Debug {
    /// Mint a signed token of `kind`, issued at `now`.
    fn generate(&self, kind: TokenKind, now: SystemTime) -> Result<String, AuthError>;

    /// Validate `token` as of `now` and return its claims.
    fn verify(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError>;

    fn is_valid(&self, token: &str, now: SystemTime) -> bool {
        self.verify(token, now).is_ok()
    }
}
