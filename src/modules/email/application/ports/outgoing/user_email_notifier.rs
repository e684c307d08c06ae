use crate::auth::application::use_cases::create_account::CreateAccountOutput;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Could not build verification link: {0}")]
    InvalidVerificationLink(String),

    #[error("Could not render email body: {0}")]
    TemplateRenderingFailed(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// A fully composed message, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub verification_link: String,
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    /// Synchronous and side-effect free: everything that can fail before
    /// anything leaves the process.
    fn compose_verification_email(
        &self,
        account: &CreateAccountOutput,
    ) -> Result<VerificationEmail, UserEmailNotificationError>;

    async fn deliver(&self, email: &VerificationEmail) -> Result<(), UserEmailNotificationError>;
}
