use crate::{ConfigError, ConfigErrorResult, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

use std::time::Duration;

use serde::Deserialize;

pub(crate) const DEFAULT_OCR_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub(crate) const DEFAULT_OCR_MODEL: &str = "gemini-1.5-flash";
pub(crate) const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Vision model used to read document text
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub base_url: String,
    pub model: String,
    /// Without a key the OCR stage reports itself unavailable
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_OCR_BASE_URL),
            model: String::from(DEFAULT_OCR_MODEL),
            api_key: None,
            timeout_secs: DEFAULT_OCR_TIMEOUT_SECS,
        }
    }
}

impl OcrConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::ocr(format!(
                "ocr.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ocr("ocr.model cannot be empty"));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::ocr(format!(
                "ocr.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when an API key is present and non-blank
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

pub(crate) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
