use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub(crate) const DEFAULT_MATCH_THRESHOLD: f64 = 0.40;
pub(crate) const MAX_MATCH_THRESHOLD: f64 = 2.0;
pub(crate) const DEFAULT_LIVENESS_REFERENCE_IMAGE: &str = "dummy_face_for_liveness.jpg";
pub(crate) const DEFAULT_FACE_CONTRAST: f32 = 25.0;
pub(crate) const MAX_FACE_CONTRAST: f32 = 100.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Faces match when distance <= threshold
    pub match_threshold: f64,
    /// Known-live portrait used for the anti-spoofing comparison.
    /// Relative paths resolve against the config directory.
    pub liveness_reference_image: String,
    /// Contrast boost applied to the document face crop before embedding
    pub face_contrast: f32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            liveness_reference_image: String::from(DEFAULT_LIVENESS_REFERENCE_IMAGE),
            face_contrast: DEFAULT_FACE_CONTRAST,
        }
    }
}

impl VerificationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // NaN fails both comparisons
        if !(self.match_threshold > 0.0 && self.match_threshold <= MAX_MATCH_THRESHOLD) {
            return Err(ConfigError::verification(format!(
                "verification.match_threshold must be in (0, {}], got {}",
                MAX_MATCH_THRESHOLD, self.match_threshold
            )));
        }

        if self.liveness_reference_image.trim().is_empty() {
            return Err(ConfigError::verification(
                "verification.liveness_reference_image cannot be empty",
            ));
        }

        if !(self.face_contrast >= -MAX_FACE_CONTRAST && self.face_contrast <= MAX_FACE_CONTRAST)
        {
            return Err(ConfigError::verification(format!(
                "verification.face_contrast must be {}-{}, got {}",
                -MAX_FACE_CONTRAST, MAX_FACE_CONTRAST, self.face_contrast
            )));
        }

        Ok(())
    }
}
