use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::auth::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, CreateAccountOutput, ICreateAccountUseCase,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotifier, VerificationEmail,
};

pub const REGISTERED_MESSAGE: &str =
    "Registration successful. Please check your email to verify your account.";
pub const REGISTERED_WITHOUT_EMAIL_MESSAGE: &str =
    "User registered, but verification email could not be sent.";

// ============================================================================
// Registration Output with Message
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRegistrationOutput {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture_path: Option<String>,
    pub is_verified: bool,
    /// Whether a verification email was composed and handed to the background sender.
    pub email_dispatched: bool,
    pub message: String,
}

impl AccountRegistrationOutput {
    fn new(output: CreateAccountOutput, email_dispatched: bool) -> Self {
        let message = if email_dispatched {
            REGISTERED_MESSAGE
        } else {
            REGISTERED_WITHOUT_EMAIL_MESSAGE
        };

        Self {
            account_id: output.account_id,
            name: output.name,
            email: output.email,
            profile_picture_path: output.profile_picture_path,
            is_verified: output.is_verified,
            email_dispatched,
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AccountRegistrationError {
    #[error("Account creation failed: {0}")]
    CreateAccountFailed(#[from] CreateAccountError),
}

/// Delay before attempt `n + 1` is `base_delay * 2^n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailRetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl EmailRetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2_u32.saturating_pow(attempt))
    }
}

impl Default for EmailRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

// ============================================================================
// Account Registration (Orchestration Layer)
// ============================================================================

#[derive(Clone)]
pub struct AccountRegistrationOrchestrator {
    create_account_use_case: Arc<dyn ICreateAccountUseCase + Send + Sync>,
    email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    retry_policy: EmailRetryPolicy,
}

impl AccountRegistrationOrchestrator {
    pub fn new(
        create_account_use_case: Arc<dyn ICreateAccountUseCase + Send + Sync>,
        email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_account_use_case,
            email_notifier,
            retry_policy: EmailRetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: EmailRetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Creates the account, then composes the verification email and hands it
    /// to a detached task. The response never waits for delivery.
    pub async fn register_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountRegistrationOutput, AccountRegistrationError> {
        let created = self.create_account_use_case.execute(input).await?;

        let email_dispatched = match self.email_notifier.compose_verification_email(&created) {
            Ok(email) => {
                self.spawn_delivery(created.account_id, email);
                true
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %created.account_id,
                    error = %e,
                    "Verification email could not be composed"
                );
                false
            }
        };

        Ok(AccountRegistrationOutput::new(created, email_dispatched))
    }

    fn spawn_delivery(&self, account_id: Uuid, email: VerificationEmail) {
        let notifier = self.email_notifier.clone();
        let policy = self.retry_policy;

        tokio::spawn(async move {
            let max_attempts = policy.max_attempts.max(1);
            for attempt in 1..=max_attempts {
                match notifier.deliver(&email).await {
                    Ok(()) => {
                        tracing::info!(%account_id, attempt, "Verification email sent");
                        return;
                    }
                    Err(e) if attempt < max_attempts => {
                        tracing::warn!(
                            %account_id,
                            attempt,
                            max_attempts,
                            error = %e,
                            "Verification email attempt failed, retrying"
                        );
                        tokio::time::sleep(policy.delay_after(attempt)).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            %account_id,
                            max_attempts,
                            error = %e,
                            "All verification email attempts failed"
                        );
                    }
                }
            }
        });
    }
}
