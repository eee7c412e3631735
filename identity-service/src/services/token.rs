use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::services::ServiceError;

/// Bearer token service, HS256 signed.
///
/// The signing secret is injected at construction; nothing here reads
/// ambient state, so tests can run each service instance with its own key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: i64,
}

/// Bearer token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (administrator email)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_hours: config.ttl_hours,
        }
    }

    /// Sign a bearer token for the subject email.
    pub fn issue(&self, subject_email: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.ttl_hours);

        let claims = TokenClaims {
            sub: subject_email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Failed to encode token: {}", e)))?;

        Ok(token)
    }

    /// Validate a bearer token and return the subject email.
    ///
    /// A well-formed token past its expiry is `TokenExpired`; anything else
    /// that fails to verify (malformed, wrong signature) is `InvalidToken`.
    /// Leeway is zero so the validity window is exact.
    pub fn validate(&self, token: &str) -> Result<String, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::InvalidToken,
                }
            })?;

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl_hours: i64) -> TokenService {
        TokenService::new(&TokenConfig {
            secret: secret.to_string(),
            ttl_hours,
        })
    }

    #[test]
    fn issue_and_validate_round_trip() {
        let svc = service("test-secret-one", 24);

        let token = svc.issue("ann@co.com").expect("issue failed");
        assert!(!token.is_empty());

        let subject = svc.validate(&token).expect("validate failed");
        assert_eq!(subject, "ann@co.com");
    }

    #[test]
    fn token_from_other_key_is_invalid() {
        let signer = service("test-secret-one", 24);
        let verifier = service("test-secret-two", 24);

        let token = signer.issue("ann@co.com").expect("issue failed");
        let result = verifier.validate(&token);
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let svc = service("test-secret-one", -1);

        let token = svc.issue("ann@co.com").expect("issue failed");
        let result = svc.validate(&token);
        assert!(matches!(result, Err(ServiceError::TokenExpired)));
    }

    #[test]
    fn garbage_is_invalid_not_expired() {
        let svc = service("test-secret-one", 24);

        let result = svc.validate("not.a.token");
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }

    #[test]
    fn claims_carry_the_validity_window() {
        let svc = service("test-secret-one", 24);
        let token = svc.issue("ann@co.com").expect("issue failed");

        // Decode without verification to inspect the claims directly.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let data = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_secret(b"irrelevant"),
            &validation,
        )
        .expect("decode failed");

        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
    }
}
