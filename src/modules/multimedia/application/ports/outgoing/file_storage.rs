use async_trait::async_trait;

use crate::multimedia::application::domain::entities::{IncomingFile, StoredImage};

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("Failed to write file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove file: {0}")]
    RemoveFailed(String),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(&self, file: IncomingFile) -> Result<StoredImage, FileStorageError>;

    /// Removing a file that is already gone is not an error.
    async fn remove(&self, file: &StoredImage) -> Result<(), FileStorageError>;
}
