use crate::auth::application::domain::entities::{Account, NewAccount};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `AccountAlreadyExists` when the email is already stored.
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError>;

    /// Only an unverified account still holding exactly `token` matches.
    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Sets `is_verified` and clears the token, but only while the account
    /// still holds `token`. Returns `AccountNotFound` when nothing changed.
    async fn mark_verified(&self, account_id: Uuid, token: &str)
        -> Result<(), AccountRepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Account already exists")]
    AccountAlreadyExists,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
