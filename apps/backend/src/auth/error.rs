use thiserror::Error;

/// Failure taxonomy of token issuance and verification.
///
/// The three verification failures stay distinct here so they can be
/// logged; the HTTP layer collapses them into one 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Not a structurally valid token
    #[error("malformed token")]
    MalformedToken,
    /// Signature, algorithm, issuer or audience check failed
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    ExpiredToken,
    /// Randomness source or signer failed while minting
    #[error("token generation failed: {0}")]
    Generation(String),
}
