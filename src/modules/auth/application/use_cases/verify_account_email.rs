use crate::auth::application::domain::entities::normalize_email;
use crate::auth::application::ports::outgoing::{AccountRepository, AccountRepositoryError};
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyAccountEmailInput {
    pub token: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyAccountEmailError {
    #[error("Invalid verification link.")]
    InvalidRequest,

    #[error("Invalid or expired verification link.")]
    InvalidOrExpiredLink,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IVerifyAccountEmailUseCase: Send + Sync {
    async fn execute(&self, input: VerifyAccountEmailInput)
        -> Result<(), VerifyAccountEmailError>;
}

#[derive(Debug, Clone)]
pub struct VerifyAccountEmailUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
}

impl<R> VerifyAccountEmailUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<R> IVerifyAccountEmailUseCase for VerifyAccountEmailUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(
        &self,
        input: VerifyAccountEmailInput,
    ) -> Result<(), VerifyAccountEmailError> {
        let (token, email) = match (non_blank(input.token), non_blank(input.email)) {
            (Some(token), Some(email)) => (token, normalize_email(&email)),
            _ => return Err(VerifyAccountEmailError::InvalidRequest),
        };

        let account = self
            .repository
            .find_by_email_and_token(&email, &token)
            .await
            .map_err(|e| VerifyAccountEmailError::RepositoryError(e.to_string()))?
            .ok_or(VerifyAccountEmailError::InvalidOrExpiredLink)?;

        // A concurrent verification of the same link may win between lookup and update.
        self.repository
            .mark_verified(account.id, &token)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::AccountNotFound => {
                    VerifyAccountEmailError::InvalidOrExpiredLink
                }
                other => VerifyAccountEmailError::RepositoryError(other.to_string()),
            })
    }
}
