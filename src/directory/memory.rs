use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Account, NewAccount};
use super::{AccountDirectory, DirectoryError};

/// In-process account directory.
///
/// Uniqueness is enforced under the write lock, so a registration race on
/// the same email resolves to exactly one winner even when both callers
/// passed a `find_by_email` pre-check.
pub struct InMemoryDirectory {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, fields: NewAccount) -> Result<Account, DirectoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == fields.email) {
            return Err(DirectoryError::Duplicate);
        }
        let account = Account::new(fields);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(email: &str) -> NewAccount {
        NewAccount {
            name: "Jo".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let directory = InMemoryDirectory::new();
        let created = directory.create(fields("jo@example.com")).await.unwrap();

        let by_email = directory
            .find_by_email("jo@example.com")
            .await
            .unwrap()
            .expect("account should exist");
        assert_eq!(by_email.id, created.id);

        let by_id = directory
            .find_by_id(created.id)
            .await
            .unwrap()
            .expect("account should exist");
        assert_eq!(by_id.email, "jo@example.com");
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let directory = InMemoryDirectory::new();
        assert!(directory
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(directory.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let directory = InMemoryDirectory::new();
        directory.create(fields("jo@example.com")).await.unwrap();

        let err = directory.create(fields("jo@example.com")).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Duplicate));
    }
}
