use crate::{FaceComparison, FaceModel, FaceModelError, FaceModelResult, FaceReference};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LivenessStatus {
    Passed,
    SpoofDetected,
    /// No face in the live or the reference image
    DetectionFailed,
    Error,
    /// Reference image missing; no comparison attempted
    ConfigurationError,
}

impl LivenessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::SpoofDetected => "spoof_detected",
            Self::DetectionFailed => "detection_failed",
            Self::Error => "error",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessOutcome {
    pub passed: bool,
    pub status: LivenessStatus,
    pub message: String,
}

impl LivenessOutcome {
    fn failed(status: LivenessStatus, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            status,
            message: message.into(),
        }
    }
}

/// Anti-spoofing check of the live image against a known-live reference
pub struct LivenessChecker {
    face_model: Arc<dyn FaceModel>,
    reference_image: PathBuf,
}

impl LivenessChecker {
    pub fn new(face_model: Arc<dyn FaceModel>, reference_image: impl Into<PathBuf>) -> Self {
        Self {
            face_model,
            reference_image: reference_image.into(),
        }
    }

    pub fn reference_image(&self) -> &Path {
        &self.reference_image
    }

    /// One comparator call, no retries.
    pub async fn check(&self, live_image: &Path) -> LivenessOutcome {
        info!("Performing liveness check on {}", live_image.display());

        if !tokio::fs::try_exists(&self.reference_image)
            .await
            .unwrap_or(false)
        {
            error!(
                "Liveness reference image not found at {}",
                self.reference_image.display()
            );
            return LivenessOutcome::failed(
                LivenessStatus::ConfigurationError,
                "Liveness FAILED: System configuration error (missing reference image).",
            );
        }

        let result = self
            .face_model
            .verify(
                live_image,
                FaceReference::Image(&self.reference_image),
                true,
            )
            .await;

        let outcome = classify(result);
        if outcome.passed {
            info!("Liveness outcome: {}", outcome.message);
        } else {
            warn!("Liveness outcome: {}", outcome.message);
        }
        outcome
    }
}

pub(crate) fn classify(result: FaceModelResult<FaceComparison>) -> LivenessOutcome {
    match result {
        Ok(comparison) if comparison.is_spoof == Some(true) => LivenessOutcome::failed(
            LivenessStatus::SpoofDetected,
            "Liveness FAILED: spoof detected (is_spoof flag).",
        ),
        Ok(_) => LivenessOutcome {
            passed: true,
            status: LivenessStatus::Passed,
            message: "Liveness PASSED.".to_string(),
        },
        Err(FaceModelError::SpoofDetected { .. }) => LivenessOutcome::failed(
            LivenessStatus::SpoofDetected,
            "Liveness FAILED: spoof detected.",
        ),
        Err(FaceModelError::FaceNotDetected { .. }) => LivenessOutcome::failed(
            LivenessStatus::DetectionFailed,
            "Liveness FAILED: face could not be detected.",
        ),
        Err(e) => {
            error!("Liveness comparator error: {e}");
            LivenessOutcome::failed(
                LivenessStatus::Error,
                format!("Liveness ERROR: {}", truncate(&e.detail(), 100)),
            )
        }
    }
}

pub(crate) fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
