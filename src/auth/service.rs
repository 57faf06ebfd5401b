use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::hasher::CredentialHasher;
use super::policy::PasswordPolicy;
use super::token::TokenService;
use crate::directory::{Account, AccountDirectory, DirectoryError, NewAccount};
use crate::error::AppError;

/// Lowercase and trim an email before any lookup or storage. Applied in
/// exactly one place so registration and login can never diverge on it.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Orchestrates the registration and login flows over the password policy,
/// the credential hasher, the token service and the account directory.
pub struct AuthService {
    directory: Arc<dyn AccountDirectory>,
    policy: PasswordPolicy,
    hasher: CredentialHasher,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        policy: PasswordPolicy,
        hasher: CredentialHasher,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            directory,
            policy,
            hasher,
            tokens,
        }
    }

    /// Register a new account. The password is validated against the policy
    /// before anything is hashed; hashing runs on the blocking pool because
    /// bcrypt at production cost would stall the executor.
    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Account, AppError> {
        let (name, email, password) =
            match (nonblank(name), nonblank(email), nonblank(password)) {
                (Some(n), Some(e), Some(p)) => (n, e, p),
                _ => return Err(AppError::MissingFields),
            };

        self.policy
            .validate(password)
            .map_err(|v| AppError::WeakPassword(v.to_string()))?;

        let email = normalize_email(email);
        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;

        // The pre-check above can race a concurrent registration; the
        // directory's atomic uniqueness check is the authority.
        let account = self
            .directory
            .create(NewAccount {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DirectoryError::Duplicate => AppError::DuplicateEmail,
                other => AppError::DirectoryError(other),
            })?;

        info!("registered account {}", account.id);
        Ok(account)
    }

    /// Authenticate credentials into a bearer token. A missing account and
    /// a failed password check are indistinguishable to the caller, so the
    /// response cannot be used to enumerate registered emails.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<(String, Account), AppError> {
        let (email, password) = match (nonblank(email), nonblank(password)) {
            (Some(e), Some(p)) => (e, p),
            _ => return Err(AppError::MissingFields),
        };

        let email = normalize_email(email);
        let account = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let matched = self
            .verify_blocking(password.to_string(), account.password_hash.clone())
            .await?;
        if !matched {
            warn!("failed login attempt for account {}", account.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id, &account.email)?;
        info!("issued token for account {}", account.id);
        Ok((token, account))
    }

    pub async fn find_account(&self, id: Uuid) -> Result<Account, AppError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(AppError::AccountNotFound)
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("hashing task failed: {}", e)))?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("verification task failed: {}", e)))
    }
}
