use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::application::domain::entities::{normalize_email, NewAccount};
use crate::auth::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError, PasswordHasher, TokenIssuer,
};
use crate::multimedia::application::domain::entities::StoredImage;
use crate::multimedia::application::domain::policies::{ImageUploadPolicy, ImageValidationError};
use crate::multimedia::application::ports::outgoing::FileStorage;

#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Already written to storage; removed again if the registration is rejected.
    pub profile_picture: Option<StoredImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountOutput {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture_path: Option<String>,
    pub is_verified: bool,
    pub verification_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateAccountError {
    #[error("Name, email, and password are required.")]
    MissingFields,

    #[error("Email is already registered.")]
    EmailTaken,

    #[error(transparent)]
    InvalidImage(#[from] ImageValidationError),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ICreateAccountUseCase: Send + Sync {
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError>;
}

#[derive(Clone)]
pub struct CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    file_storage: Arc<dyn FileStorage>,
    image_policy: ImageUploadPolicy,
}

impl<R> CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
            file_storage,
            image_policy: ImageUploadPolicy::profile_picture(),
        }
    }

    pub fn with_image_policy(mut self, image_policy: ImageUploadPolicy) -> Self {
        self.image_policy = image_policy;
        self
    }

    async fn register(
        &self,
        input: &CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        let name = input.name.trim();
        let email = normalize_email(&input.email);

        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(CreateAccountError::MissingFields);
        }

        let existing = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(|e| CreateAccountError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateAccountError::EmailTaken);
        }

        let profile_picture_path = match &input.profile_picture {
            Some(file) => {
                self.image_policy.validate(Some(file))?;
                Some(file.public_path.clone())
            }
            None => None,
        };

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateAccountError::HashingFailed(e.to_string()))?;

        let verification_token = self
            .token_issuer
            .issue()
            .map_err(|e| CreateAccountError::TokenGenerationFailed(e.to_string()))?;

        let account = self
            .repository
            .create_account(NewAccount {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email,
                password_hash,
                profile_picture_path,
                verification_token: verification_token.clone(),
            })
            .await
            .map_err(|e| match e {
                AccountRepositoryError::AccountAlreadyExists => CreateAccountError::EmailTaken,
                other => CreateAccountError::RepositoryError(other.to_string()),
            })?;

        debug!(account_id = %account.id, "Account persisted");

        Ok(CreateAccountOutput {
            account_id: account.id,
            name: account.name,
            email: account.email,
            profile_picture_path: account.profile_picture_path,
            is_verified: account.is_verified,
            verification_token,
        })
    }

    async fn discard_upload(&self, file: &StoredImage) {
        if let Err(e) = self.file_storage.remove(file).await {
            warn!(file = %file.disk_path.display(), error = %e, "Failed to remove rejected upload");
        }
    }
}

#[async_trait]
impl<R> ICreateAccountUseCase for CreateAccountUseCase<R>
where
    R: AccountRepository,
{
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        let result = self.register(&input).await;

        if result.is_err() {
            if let Some(file) = &input.profile_picture {
                self.discard_upload(file).await;
            }
        }

        result
    }
}
