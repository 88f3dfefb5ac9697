use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use api_starter::auth::{AuthError, Claims, JwtTokens, TokenKind, TokenProvider};
use api_starter::state::security_config::SecurityConfig;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Real JWT provider that counts how often the gate asks it to verify.
#[derive(Debug)]
pub struct CountingTokens {
    inner: JwtTokens,
    verify_calls: AtomicUsize,
}

impl CountingTokens {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: JwtTokens::new(test_security()),
            verify_calls: AtomicUsize::new(0),
        })
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl TokenProvider for CountingTokens {
    fn generate(&self, kind: TokenKind, now: SystemTime) -> Result<String, AuthError> {
        self.inner.generate(kind, now)
    }

    fn verify(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token, now)
    }
}

/// `Authorization` header pair for `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
