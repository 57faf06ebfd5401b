use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;

use super::token::{AuthenticatedIdentity, TokenError, TokenService};
use crate::error::AppError;
use crate::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Gates protected requests on a bearer credential.
///
/// Every rejection is terminal for the request and the gate never touches
/// account state; on success the verified identity is handed to the
/// handler and dropped when the request completes.
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Decide a request's fate from its Authorization header value.
    /// The header must be exactly `Bearer <token>`.
    pub fn authorize(&self, header: Option<&str>) -> Result<AuthenticatedIdentity, AppError> {
        let header = header.ok_or(AppError::MissingAuthHeader)?;

        let parts: Vec<&str> = header.split(' ').collect();
        if parts.len() != 2 || parts[0] != BEARER_SCHEME {
            debug!("authorization header is not a bearer credential");
            return Err(AppError::MalformedAuthHeader);
        }

        match self.tokens.verify(parts[1]) {
            Ok(identity) => Ok(identity),
            Err(TokenError::Expired) => Err(AppError::TokenExpired),
            Err(TokenError::Malformed) => Err(AppError::InvalidToken),
        }
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.gate.authorize(header),
            None => Err(AppError::ConfigError(
                "auth gate is not configured".to_string(),
            )),
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn gate() -> (AuthGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("test_secret", Duration::hours(1)).unwrap());
        (AuthGate::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_missing_header() {
        let (gate, _) = gate();
        assert!(matches!(
            gate.authorize(None),
            Err(AppError::MissingAuthHeader)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        let (gate, _) = gate();
        assert!(matches!(
            gate.authorize(Some("Token xyz")),
            Err(AppError::MalformedAuthHeader)
        ));
    }

    #[test]
    fn test_wrong_part_count() {
        let (gate, tokens) = gate();
        let token = tokens.issue(Uuid::new_v4(), "jo@example.com").unwrap();

        assert!(matches!(
            gate.authorize(Some("Bearer")),
            Err(AppError::MalformedAuthHeader)
        ));
        assert!(matches!(
            gate.authorize(Some(&format!("Bearer {} extra", token))),
            Err(AppError::MalformedAuthHeader)
        ));
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let (gate, tokens) = gate();
        let token = tokens.issue(Uuid::new_v4(), "jo@example.com").unwrap();

        assert!(matches!(
            gate.authorize(Some(&format!("bearer {}", token))),
            Err(AppError::MalformedAuthHeader)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let (gate, _) = gate();
        assert!(matches!(
            gate.authorize(Some("Bearer garbage")),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let (gate, tokens) = gate();
        let token = tokens
            .issue_with_ttl(Uuid::new_v4(), "jo@example.com", Duration::hours(-1))
            .unwrap();

        assert!(matches!(
            gate.authorize(Some(&format!("Bearer {}", token))),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let (gate, tokens) = gate();
        let id = Uuid::new_v4();
        let token = tokens.issue(id, "jo@example.com").unwrap();

        let identity = gate.authorize(Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.email, "jo@example.com");
    }
}
