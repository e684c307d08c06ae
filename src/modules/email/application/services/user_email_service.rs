use crate::auth::application::use_cases::create_account::CreateAccountOutput;
use crate::email::application::ports::outgoing::email_sender::EmailSender;
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};
use askama::Template;
use async_trait::async_trait;
use email_address::EmailAddress;
use std::fmt;
use std::sync::Arc;
use url::Url;

pub const VERIFY_EMAIL_PATH: &str = "/api/auth/verify-email";
pub const VERIFICATION_SUBJECT: &str = "Verify your account";

#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    base_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, base_url: &str) -> Self {
        Self {
            sender,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `<base_url>/api/auth/verify-email?token=<token>&email=<email>`, query-encoded.
    pub fn verification_link(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Url, UserEmailNotificationError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, VERIFY_EMAIL_PATH))
            .map_err(|e| UserEmailNotificationError::InvalidVerificationLink(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("token", token)
            .append_pair("email", email);

        Ok(url)
    }
}

/// Values are HTML-escaped on render.
#[derive(Template)]
#[template(
    source = r#"<p>Hello {{ name }},</p><p>Please verify your account by clicking <a href="{{ link }}">here</a>.</p>"#,
    ext = "html"
)]
struct VerificationEmailBody<'a> {
    name: &'a str,
    link: &'a str,
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    fn compose_verification_email(
        &self,
        account: &CreateAccountOutput,
    ) -> Result<VerificationEmail, UserEmailNotificationError> {
        if !EmailAddress::is_valid(&account.email) {
            return Err(UserEmailNotificationError::InvalidRecipient(
                account.email.clone(),
            ));
        }

        let link = self.verification_link(&account.verification_token, &account.email)?;

        let html_body = VerificationEmailBody {
            name: &account.name,
            link: link.as_str(),
        }
        .render()
        .map_err(|e| UserEmailNotificationError::TemplateRenderingFailed(e.to_string()))?;

        Ok(VerificationEmail {
            to: account.email.clone(),
            subject: VERIFICATION_SUBJECT.to_string(),
            html_body,
            verification_link: link.into(),
        })
    }

    async fn deliver(&self, email: &VerificationEmail) -> Result<(), UserEmailNotificationError> {
        self.sender
            .send_email(&email.to, &email.subject, &email.html_body)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))
    }
}
