use crate::email::application::ports::outgoing::email_sender::{EmailSender, EmailSenderError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every message; optionally fails every send.
#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent_emails: Arc<Mutex<Vec<SentEmail>>>,
    attempts: Arc<Mutex<usize>>,
    notify: Arc<Notify>,
    fail_with: Option<String>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn get_sent_emails(&self) -> Vec<SentEmail> {
        self.sent_emails.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    /// Resolves after the next send attempt (or immediately if one already
    /// happened and nobody consumed the notification).
    pub async fn wait_for_attempt(&self) {
        self.notify.notified().await;
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailSenderError> {
        *self.attempts.lock().unwrap() += 1;

        let result = match &self.fail_with {
            Some(reason) => Err(EmailSenderError::Transport(reason.clone())),
            None => {
                self.sent_emails.lock().unwrap().push(SentEmail {
                    to: to.to_string(),
                    subject: subject.to_string(),
                    body: body.to_string(),
                });
                Ok(())
            }
        };

        self.notify.notify_one();
        result
    }
}
