use crate::{ApiError, ApiResult};

use idv_config::UploadConfig;

use axum::body::Bytes;

/// One image part of the verification form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub field: &'static str,
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Reject parts without a file name, without content, or with a disallowed extension.
    pub fn validate(&self, upload: &UploadConfig) -> ApiResult<()> {
        if self.file_name.trim().is_empty() {
            return Err(ApiError::validation(
                format!("No selected file for '{}'", self.field),
                self.field,
            ));
        }

        if !upload.is_allowed(&self.file_name) {
            return Err(ApiError::validation(
                format!(
                    "Invalid file type for '{}'. Allowed: {}",
                    self.field,
                    upload.allowed_extensions.join(", ")
                ),
                self.field,
            ));
        }

        if self.bytes.is_empty() {
            return Err(ApiError::validation(
                format!("Uploaded file for '{}' is empty", self.field),
                self.field,
            ));
        }

        Ok(())
    }
}
