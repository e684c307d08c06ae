use crate::auth::application::domain::entities::{Account, NewAccount};
use crate::auth::application::ports::outgoing::{AccountRepository, AccountRepositoryError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Behaves like the `accounts` table: unique email, unique token, conditional verify.
#[derive(Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn all(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountRepositoryError::AccountAlreadyExists);
        }
        if accounts
            .values()
            .any(|a| a.verification_token.as_deref() == Some(account.verification_token.as_str()))
        {
            return Err(AccountRepositoryError::DatabaseError(
                "duplicate verification token".to_string(),
            ));
        }

        let account = account.into_account(Utc::now());
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|a| {
                a.email == email
                    && !a.is_verified
                    && a.verification_token.as_deref() == Some(token)
            })
            .cloned())
    }

    async fn mark_verified(
        &self,
        account_id: Uuid,
        token: &str,
    ) -> Result<(), AccountRepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();

        match accounts.get_mut(&account_id) {
            Some(account)
                if !account.is_verified && account.verification_token.as_deref() == Some(token) =>
            {
                account.is_verified = true;
                account.verification_token = None;
                account.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AccountRepositoryError::AccountNotFound),
        }
    }
}
