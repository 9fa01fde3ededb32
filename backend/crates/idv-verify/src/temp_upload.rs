use crate::{Result as VerifyErrorResult, VerifyError};

use std::path::{Path, PathBuf};

use log::{debug, error};
use uuid::Uuid;

/// An uploaded file on disk, deleted when dropped.
///
/// The pipeline owns its uploads, so they are removed on success, on a
/// gated early return, on error and while unwinding from a panic.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `bytes` to `dir` under a unique `{uuid}_{sanitized name}` file name
    pub async fn persist(dir: &Path, original_name: &str, bytes: &[u8]) -> VerifyErrorResult<Self> {
        let file_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let upload = Self {
            path: dir.join(file_name),
        };

        tokio::fs::write(&upload.path, bytes)
            .await
            .map_err(|e| VerifyError::io(&upload.path, e))?;

        debug!("Saved upload to {}", upload.path.display());
        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => error!("Error cleaning upload {}: {}", self.path.display(), e),
        }
    }
}

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`, without leading dots
pub fn sanitize_filename(name: &str) -> String {
    // Browsers on Windows may send the full client path
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
