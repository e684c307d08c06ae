use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_picture_path: Option<String>,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a registration hands to the store. Timestamps are filled in by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture_path: Option<String>,
    pub verification_token: String,
}

impl NewAccount {
    pub fn into_account(self, now: DateTime<Utc>) -> Account {
        Account {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            profile_picture_path: self.profile_picture_path,
            is_verified: false,
            verification_token: Some(self.verification_token),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Emails are compared case-insensitively and ignoring surrounding whitespace.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
