use actix_files::Files;
use std::path::Path;

use crate::multimedia::adapter::outgoing::local_file_storage::PUBLIC_UPLOADS_PREFIX;

/// Serves stored profile pictures at `/uploads/<file_name>`.
///
/// Directory listings stay disabled.
pub fn uploads_service(upload_dir: &Path) -> Files {
    Files::new(PUBLIC_UPLOADS_PREFIX, upload_dir)
}
