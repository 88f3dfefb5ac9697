//! Token issuance and verification.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod token;

pub use claims::{Claims, TokenKind};
pub use error::AuthError;
pub use jwt::JwtTokens;
pub use token::TokenProvider;
