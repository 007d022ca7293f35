//! HS256 bearer tokens.
//!
//! Implements the `TokenIssuer` trait from `poolside-core` with `jsonwebtoken`.
//! The payload is the claims record plus `iat` and `exp`.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use poolside_core::service::token::TokenIssuer;
use poolside_types::auth::{AuthClaims, Role};
use poolside_types::config::AuthSection;
use poolside_types::error::TokenError;

#[derive(Debug, Serialize, Deserialize)]
struct JwtPayload {
    id: i64,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn from_config(config: &AuthSection) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    fn issue_at(&self, claims: &AuthClaims, issued_at: i64) -> Result<String, TokenError> {
        let payload = JwtPayload {
            id: claims.id,
            email: claims.email.clone(),
            role: claims.role,
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &AuthClaims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtPayload>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(AuthClaims {
            id: data.claims.id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> AuthClaims {
        AuthClaims {
            id: 4,
            email: "tesorera@piscina.cl".to_string(),
            role: Role::Treasurer,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = JwtTokenIssuer::new("secreto", 3600);
        let token = issuer.issue(&claims()).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(issuer.verify(&token).unwrap(), claims());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtTokenIssuer::new("uno", 3600).issue(&claims()).unwrap();
        let err = JwtTokenIssuer::new("dos", 3600).verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = JwtTokenIssuer::new("secreto", 60);
        let token = issuer
            .issue_at(&claims(), Utc::now().timestamp() - 3600)
            .unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_huge_ttl_saturates_expiry() {
        let issuer = JwtTokenIssuer::new("secreto", i64::MAX);
        let token = issuer.issue(&claims()).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), claims());

        let payload = jsonwebtoken::decode::<JwtPayload>(&token, &issuer.decoding, &issuer.validation)
            .unwrap()
            .claims;
        assert_eq!(payload.exp, i64::MAX);
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = JwtTokenIssuer::new("secreto", 60);
        assert!(matches!(
            issuer.verify("not-a-token"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(issuer.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = JwtTokenIssuer::new("secreto", 3600);
        let token = issuer.issue(&claims()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let other = issuer
            .issue(&AuthClaims {
                role: Role::Admin,
                ..claims()
            })
            .unwrap();
        let other_payload = other.split('.').nth(1).unwrap().to_string();
        parts[1] = &other_payload;
        assert!(issuer.verify(&parts.join(".")).is_err());
    }
}
