use crate::auth::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, CreateAccountOutput, ICreateAccountUseCase,
};
use crate::auth::application::use_cases::verify_account_email::{
    IVerifyAccountEmailUseCase, VerifyAccountEmailError, VerifyAccountEmailInput,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};
use crate::multimedia::application::domain::entities::{IncomingFile, StoredImage};
use crate::multimedia::application::ports::outgoing::{FileStorage, FileStorageError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Default, Clone)]
pub struct StubCreateAccountUseCase;

#[async_trait]
impl ICreateAccountUseCase for StubCreateAccountUseCase {
    async fn execute(
        &self,
        _input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubVerifyAccountEmailUseCase;

#[async_trait]
impl IVerifyAccountEmailUseCase for StubVerifyAccountEmailUseCase {
    async fn execute(&self, _input: VerifyAccountEmailInput) -> Result<(), VerifyAccountEmailError> {
        unimplemented!("Not used in this test")
    }
}

/// Composes a fixed message and accepts every delivery.
#[derive(Default, Clone)]
pub struct StubUserEmailNotifier {
    uncomposable: bool,
}

impl StubUserEmailNotifier {
    pub fn uncomposable() -> Self {
        Self { uncomposable: true }
    }
}

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    fn compose_verification_email(
        &self,
        account: &CreateAccountOutput,
    ) -> Result<VerificationEmail, UserEmailNotificationError> {
        if self.uncomposable {
            return Err(UserEmailNotificationError::InvalidRecipient(
                account.email.clone(),
            ));
        }
        Ok(VerificationEmail {
            to: account.email.clone(),
            subject: "Verify your account".to_string(),
            html_body: String::new(),
            verification_link: String::new(),
        })
    }

    async fn deliver(&self, _email: &VerificationEmail) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}

/// Keeps nothing on disk; remembers what was saved and forgets removed files.
#[derive(Default, Clone)]
pub struct RecordingFileStorage {
    saved: Arc<Mutex<Vec<StoredImage>>>,
}

impl RecordingFileStorage {
    pub fn saved(&self) -> Vec<StoredImage> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for RecordingFileStorage {
    async fn save(&self, file: IncomingFile) -> Result<StoredImage, FileStorageError> {
        let mut saved = self.saved.lock().unwrap();
        let file_name = format!("1700000000000-{}-{}", saved.len(), file.original_name);

        let stored = StoredImage {
            disk_path: PathBuf::from("uploads").join(&file_name),
            public_path: format!("/uploads/{}", file_name),
            file_name,
            media_type: file.media_type,
            size_bytes: file.bytes.len() as u64,
        };
        saved.push(stored.clone());
        Ok(stored)
    }

    async fn remove(&self, file: &StoredImage) -> Result<(), FileStorageError> {
        self.saved
            .lock()
            .unwrap()
            .retain(|stored| stored.file_name != file.file_name);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct FailingFileStorage;

#[async_trait]
impl FileStorage for FailingFileStorage {
    async fn save(&self, _file: IncomingFile) -> Result<StoredImage, FileStorageError> {
        Err(FileStorageError::WriteFailed("disk full".to_string()))
    }

    async fn remove(&self, _file: &StoredImage) -> Result<(), FileStorageError> {
        Err(FileStorageError::RemoveFailed("disk gone".to_string()))
    }
}
