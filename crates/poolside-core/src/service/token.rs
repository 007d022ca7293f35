//! TokenIssuer trait for bearer tokens.
//!
//! The JWT adapter lives in poolside-infra. Services and the HTTP extractor
//! only see claims in, opaque string out (and back).

use poolside_types::auth::AuthClaims;
use poolside_types::error::TokenError;

/// Issues and verifies opaque bearer tokens carrying [`AuthClaims`].
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `claims` that expires after the configured lifetime.
    fn issue(&self, claims: &AuthClaims) -> Result<String, TokenError>;

    /// Return the claims of a valid, unexpired token.
    fn verify(&self, token: &str) -> Result<AuthClaims, TokenError>;
}
