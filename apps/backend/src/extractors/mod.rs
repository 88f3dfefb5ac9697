pub mod validated_json;
pub mod verified_claims;

pub use validated_json::ValidatedJson;
pub use verified_claims::VerifiedClaims;
