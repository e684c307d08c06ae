pub mod email_sender;
pub mod user_email_notifier;

pub use email_sender::{EmailSender, EmailSenderError};
