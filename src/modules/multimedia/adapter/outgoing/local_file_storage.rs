use async_trait::async_trait;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::multimedia::application::domain::entities::{IncomingFile, StoredImage};
use crate::multimedia::application::ports::outgoing::file_storage::{
    FileStorage, FileStorageError,
};

pub const PUBLIC_UPLOADS_PREFIX: &str = "/uploads";

/// Stores uploads as flat files in one directory, served statically under `/uploads`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    root_dir: PathBuf,
}

impl LocalFileStorage {
    /// Creates `root_dir` if it does not exist yet.
    pub async fn new(root_dir: impl Into<PathBuf>) -> Result<Self, FileStorageError> {
        let root_dir = root_dir.into();
        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| FileStorageError::WriteFailed(e.to_string()))?;

        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// `<millisecond-timestamp>-<random-int><original-extension>`
    pub fn generate_file_name(original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let random: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);

        format!("{}-{}{}", millis, random, extension_of(original_name))
    }
}

/// Extension including the dot, or empty. Anything but ASCII alphanumerics is dropped.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, file: IncomingFile) -> Result<StoredImage, FileStorageError> {
        let file_name = Self::generate_file_name(&file.original_name);
        let disk_path = self.root_dir.join(&file_name);
        let size_bytes = file.bytes.len() as u64;

        fs::write(&disk_path, &file.bytes)
            .await
            .map_err(|e| FileStorageError::WriteFailed(e.to_string()))?;

        debug!(file = %disk_path.display(), size_bytes, "Stored upload");

        Ok(StoredImage {
            public_path: format!("{}/{}", PUBLIC_UPLOADS_PREFIX, file_name),
            file_name,
            disk_path,
            media_type: file.media_type,
            size_bytes,
        })
    }

    async fn remove(&self, file: &StoredImage) -> Result<(), FileStorageError> {
        match fs::remove_file(&file.disk_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileStorageError::RemoveFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: Vec<u8>) -> IncomingFile {
        IncomingFile {
            original_name: "avatar.png".to_string(),
            media_type: "image/png".to_string(),
            bytes,
        }
    }

    #[test]
    fn test_generate_file_name_format() {
        let name = LocalFileStorage::generate_file_name("holiday photo.JPG");

        let (stem, ext) = name.rsplit_once('.').expect("extension kept");
        assert_eq!(ext, "JPG");

        let (millis, random) = stem.split_once('-').expect("timestamp-random");
        assert!(millis.parse::<i64>().is_ok(), "Bad timestamp in {}", name);
        let random: u32 = random.parse().expect("random int");
        assert!(random <= 1_000_000_000);
    }

    #[test]
    fn test_extension_sanitized() {
        assert_eq!(extension_of("avatar.png"), ".png");
        assert_eq!(extension_of("no_extension"), "");
        assert_eq!(extension_of("../../etc/passwd"), "");
        assert_eq!(extension_of("weird.p n g"), "");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }

    #[tokio::test]
    async fn test_save_writes_file_and_builds_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path()).await.unwrap();

        let stored = storage.save(png(vec![1, 2, 3, 4])).await.unwrap();

        assert_eq!(stored.size_bytes, 4);
        assert_eq!(stored.media_type, "image/png");
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.file_name));
        assert_eq!(stored.disk_path, dir.path().join(&stored.file_name));
        assert_eq!(fs::read(&stored.disk_path).await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path()).await.unwrap();
        let stored = storage.save(png(vec![0; 16])).await.unwrap();

        storage.remove(&stored).await.unwrap();

        assert!(!stored.disk_path.exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path()).await.unwrap();
        let stored = storage.save(png(vec![0; 16])).await.unwrap();

        storage.remove(&stored).await.unwrap();
        assert!(storage.remove(&stored).await.is_ok());
    }

    #[tokio::test]
    async fn test_new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("uploads");

        let storage = LocalFileStorage::new(&nested).await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.root_dir(), nested.as_path());
    }
}
