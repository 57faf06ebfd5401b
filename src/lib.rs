pub mod auth;
pub mod config;
pub mod directory;
pub mod error;

use std::sync::Arc;

use actix_web::HttpResponse;
use chrono::Duration;

pub use config::Settings;
pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;

pub use auth::{
    AuthGate, AuthService, AuthenticatedIdentity, CredentialHasher, PasswordPolicy, TokenService,
};
pub use directory::{Account, AccountDirectory, InMemoryDirectory};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth: Arc<AuthService>,
    pub gate: Arc<AuthGate>,
}

impl AppState {
    /// Build the service graph from settings. Fails fast on an empty JWT
    /// secret so misconfiguration aborts startup, not the first request.
    pub fn new(config: Settings) -> Result<Self> {
        Self::with_directory(config, Arc::new(InMemoryDirectory::new()))
    }

    pub fn with_directory(config: Settings, directory: Arc<dyn AccountDirectory>) -> Result<Self> {
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            Duration::hours(config.auth.token_ttl_hours),
        )?);

        let auth = AuthService::new(
            directory,
            PasswordPolicy::default(),
            CredentialHasher::new(config.auth.hash_cost),
            tokens.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            gate: Arc::new(AuthGate::new(tokens)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        assert!(AppState::new(config).is_ok());
    }

    #[test]
    fn test_app_state_rejects_empty_secret() {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.auth.jwt_secret = String::new();

        let state = AppState::new(config);
        assert!(matches!(state, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_app_state_clone_shares_services() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config).unwrap();
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.auth, &cloned.auth));
        assert!(Arc::ptr_eq(&state.gate, &cloned.gate));
    }
}
