//! Account directory for the gatekeeper server
//!
//! This module defines the storage abstraction the auth flows depend on,
//! plus the in-process implementation used by the server and tests.

pub mod models;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use models::{Account, NewAccount};
pub use memory::InMemoryDirectory;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("duplicate email")]
    Duplicate,

    #[error("directory failure: {0}")]
    Internal(String),
}

/// Storage abstraction for account records.
///
/// Implementations must enforce email uniqueness atomically in `create`:
/// two concurrent registrations with the same email must resolve to one
/// success and one `DirectoryError::Duplicate`, regardless of any lookup
/// the caller performed beforehand. Emails are already normalized
/// (trimmed, lowercased) when they reach this interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DirectoryError>;

    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError>;
}
