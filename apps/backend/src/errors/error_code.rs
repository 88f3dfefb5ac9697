//! Error codes for the API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing, invalid or expired bearer credentials
    Unauthorized,

    // Request validation
    /// Body or field failed validation
    ValidationError,
    /// Body could not be read or parsed
    BadRequest,
    /// Path id is not a positive integer
    InvalidLabubuId,

    // Resource not found
    LabubuNotFound,
    NotFound,

    // Token issuance
    /// Signing or the randomness source failed while minting a token
    TokenGenerationFailed,

    // Infrastructure
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidLabubuId => "INVALID_LABUBU_ID",
            Self::LabubuNotFound => "LABUBU_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorCode> for &'static str {
    fn from(code: ErrorCode) -> Self {
        code.as_str()
    }
}
