use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde_json::{Map, Value};
use tracing::debug;

use super::claims::{Claims, TokenKind};
use super::error::AuthError;
use super::token::TokenProvider;
use crate::state::security_config::SecurityConfig;

const TOKEN_ID_BYTES: usize = 32;
const TOKEN_SEGMENTS: usize = 3;

/// HMAC-signed JWTs built from a [`SecurityConfig`].
#[derive(Clone)]
pub struct JwtTokens {
    security: SecurityConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokens {
    pub fn new(security: SecurityConfig) -> Self {
        let mut validation = Validation::new(security.algorithm);
        // expiry is checked against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[security.issuer.as_str()]);
        validation.set_audience(&[security.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "aud"]);

        Self {
            encoding: EncodingKey::from_secret(&security.jwt_secret),
            decoding: DecodingKey::from_secret(&security.jwt_secret),
            validation,
            security,
        }
    }

    /// Mint a token carrying `data` in its claims.
    pub fn generate_with_data(
        &self,
        kind: TokenKind,
        data: Map<String, Value>,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Generation("system clock is before the unix epoch".into()))?
            .as_secs() as i64;
        let ttl = i64::try_from(self.security.ttl(kind).as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            exp: iat.saturating_add(ttl),
            iat,
            iss: self.security.issuer.clone(),
            aud: self.security.audience.clone(),
            jti: new_token_id()?,
            typ: kind,
            data,
        };

        encode(&Header::new(self.security.algorithm), &claims, &self.encoding)
            .map_err(|e| AuthError::Generation(format!("failed to sign token: {e}")))
    }
}

impl TokenProvider for JwtTokens {
    fn generate(&self, kind: TokenKind, now: SystemTime) -> Result<String, AuthError> {
        self.generate_with_data(kind, Map::new(), now)
    }

    fn verify(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        if token.split('.').count() != TOKEN_SEGMENTS {
            return Err(AuthError::MalformedToken);
        }
        // the header is signed input; one that no longer decodes was altered
        if let Err(e) = decode_header(token) {
            debug!(error = %e, "token header does not decode");
            return Err(AuthError::InvalidToken);
        }

        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(classify_decode_error)?
            .claims;

        if claims.iat > claims.exp {
            debug!(iat = claims.iat, exp = claims.exp, "token issued after its own expiry");
            return Err(AuthError::InvalidToken);
        }

        // a clock before the epoch cannot have passed any expiry
        let now_secs = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        if claims.is_expired_at(now_secs) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}

impl fmt::Debug for JwtTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokens")
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}

/// Runs after the shape and header checks. The signature is verified before
/// the claims are parsed, so a claims `Json`/`Utf8` failure means the signer
/// produced them; a `Base64` failure here is a damaged signature segment.
fn classify_decode_error(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    }
}

/// 32 bytes from the OS RNG, URL-safe base64 without padding.
fn new_token_id() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::Generation(format!("randomness source unavailable: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
