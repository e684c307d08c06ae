use std::path::PathBuf;

/// A file received from a client, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub original_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// A file persisted by a [`FileStorage`](crate::multimedia::application::ports::outgoing::FileStorage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// `<millis>-<random><ext>`
    pub file_name: String,
    pub disk_path: PathBuf,
    /// URL path the file is served under, e.g. `/uploads/1700000000000-42.png`.
    pub public_path: String,
    pub media_type: String,
    pub size_bytes: u64,
}
