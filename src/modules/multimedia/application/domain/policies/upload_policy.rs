use crate::multimedia::application::domain::entities::StoredImage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageValidationError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only JPG and PNG images are allowed")]
    UnsupportedType(String),

    #[error("File size exceeds 2MB")]
    TooLarge { max_bytes: u64, actual_bytes: u64 },
}

/// Gate for profile pictures: declared media type and size only, no decoding.
#[derive(Debug, Clone)]
pub struct ImageUploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_mime_types: &'static [&'static str],
}

impl ImageUploadPolicy {
    pub const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
    pub const ALLOWED_MIME_TYPES: &'static [&'static str] = &["image/jpeg", "image/png"];

    pub fn profile_picture() -> Self {
        Self {
            max_file_size_bytes: Self::MAX_FILE_SIZE_BYTES,
            allowed_mime_types: Self::ALLOWED_MIME_TYPES,
        }
    }

    pub fn validate(&self, file: Option<&StoredImage>) -> Result<(), ImageValidationError> {
        let file = file.ok_or(ImageValidationError::NoFile)?;

        if !self.allowed_mime_types.contains(&file.media_type.as_str()) {
            return Err(ImageValidationError::UnsupportedType(
                file.media_type.clone(),
            ));
        }

        if file.size_bytes > self.max_file_size_bytes {
            return Err(ImageValidationError::TooLarge {
                max_bytes: self.max_file_size_bytes,
                actual_bytes: file.size_bytes,
            });
        }

        Ok(())
    }
}

impl Default for ImageUploadPolicy {
    fn default() -> Self {
        Self::profile_picture()
    }
}
