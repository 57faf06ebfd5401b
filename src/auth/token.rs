use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// The identity a verified token grants. Only these two fields are trusted
/// out of the payload; everything else in the token is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Closed set of verification failures. Parse failures, bad signatures,
/// tampering and wrong-secret tokens all collapse into `Malformed`; the
/// distinction is logged but never reported to the caller of the API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Malformed,
}

/// Issues and verifies signed, expiring bearer tokens (JWT, HS256).
///
/// The signing secret is injected at construction and is the only shared
/// state; issuance and verification are cheap, pure computations.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Fails fast when the secret is absent, so misconfiguration aborts
    /// startup instead of rejecting every request at runtime.
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AppError> {
        if secret.trim().is_empty() {
            return Err(AppError::ConfigError(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn issue(&self, subject_id: Uuid, subject_email: &str) -> Result<String, AppError> {
        self.issue_with_ttl(subject_id, subject_email, self.ttl)
    }

    pub fn issue_with_ttl(
        &self,
        subject_id: Uuid,
        subject_email: &str,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            email: subject_email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("token encoding failed: {}", e)))
    }

    /// Walk a presented token through parse, signature and expiry checks.
    /// The first failing check wins; which one failed is logged for
    /// diagnostics while callers only see the two public kinds.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    debug!("token rejected at expiry check");
                    TokenError::Expired
                }
                ErrorKind::InvalidSignature => {
                    debug!("token rejected at signature check");
                    TokenError::Malformed
                }
                other => {
                    debug!("token rejected at parse: {:?}", other);
                    TokenError::Malformed
                }
            }
        })?;

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| {
            debug!("token subject is not a valid account id");
            TokenError::Malformed
        })?;

        Ok(AuthenticatedIdentity {
            id,
            email: data.claims.email,
        })
    }
}
