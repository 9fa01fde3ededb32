use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub(crate) const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub(crate) const DEFAULT_UPLOAD_MAX_BYTES: usize = 16 * 1024 * 1024;
pub(crate) const MIN_UPLOAD_MAX_BYTES: usize = 1024;
pub(crate) const MAX_UPLOAD_MAX_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Scratch directory for uploads, relative to the config directory
    pub dir: String,
    /// Request body limit for the verification endpoint
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_UPLOAD_DIR),
            max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
            allowed_extensions: ["png", "jpg", "jpeg"].map(String::from).to_vec(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.trim().is_empty() || self.dir.contains("..") {
            return Err(ConfigError::upload(
                "upload.dir cannot be empty or contain '..'",
            ));
        }

        if !(MIN_UPLOAD_MAX_BYTES..=MAX_UPLOAD_MAX_BYTES).contains(&self.max_bytes) {
            return Err(ConfigError::upload(format!(
                "upload.max_bytes must be {}-{}, got {}",
                MIN_UPLOAD_MAX_BYTES, MAX_UPLOAD_MAX_BYTES, self.max_bytes
            )));
        }

        if self.allowed_extensions.is_empty()
            || self.allowed_extensions.iter().any(|e| e.trim().is_empty())
        {
            return Err(ConfigError::upload(
                "upload.allowed_extensions must list at least one non-empty extension",
            ));
        }

        Ok(())
    }

    /// Case-insensitive check of a file name's extension
    pub fn is_allowed(&self, filename: &str) -> bool {
        let Some((_, extension)) = filename.rsplit_once('.') else {
            return false;
        };
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}
