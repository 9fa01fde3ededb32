//! Per-request aggregate returned to the client. Built stage by stage.

use crate::{LivenessOutcome, LivenessStatus, MatchOutcome, MatchStatus};

use idv_core::ExtractedDetails;
use idv_db::StoreOutcome;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    NotProcessed,
    Success,
    Failed,
}

/// Liveness stage status, including why it did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LivenessStage {
    NotPerformed,
    SkippedIdProcessingFailed,
    #[serde(untagged)]
    Completed(LivenessStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    NotPerformed,
    SkippedIdProcessingFailed,
    SkippedLivenessFailed,
    #[serde(untagged)]
    Completed(MatchStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStage {
    NotAttempted,
    Skipped,
    Attempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdCardProcessing {
    pub status: ProcessingStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivenessCheck {
    pub passed: bool,
    pub status: LivenessStage,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceVerification {
    pub verified: bool,
    pub status: MatchStage,
    pub message: String,
    /// Four decimal places
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStorage {
    pub stored: bool,
    pub status: StorageStage,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub text_details: Option<ExtractedDetails>,
    pub id_card_processing: IdCardProcessing,
    pub liveness_check: LivenessCheck,
    pub face_verification: FaceVerification,
    pub database_storage: DatabaseStorage,
    pub overall_status: String,
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self {
            text_details: None,
            id_card_processing: IdCardProcessing {
                status: ProcessingStatus::NotProcessed,
                message: String::new(),
            },
            liveness_check: LivenessCheck {
                passed: false,
                status: LivenessStage::NotPerformed,
                message: String::new(),
            },
            face_verification: FaceVerification {
                verified: false,
                status: MatchStage::NotPerformed,
                message: String::new(),
                distance: None,
                threshold: None,
                model: None,
                metric: None,
            },
            database_storage: DatabaseStorage {
                stored: false,
                status: StorageStage::NotAttempted,
                message: String::new(),
            },
            overall_status: "Pending".to_string(),
        }
    }
}

impl VerificationResult {
    pub(crate) fn record_extraction(&mut self, details: &ExtractedDetails, has_embedding: bool) {
        self.text_details = Some(details.clone());

        let (status, message) = if let Some(failure) = details.text_failure() {
            (ProcessingStatus::Failed, failure.to_string())
        } else if !has_embedding {
            let reason = details
                .face_failure()
                .unwrap_or("Could not get face embedding from ID card.");
            (ProcessingStatus::Failed, reason.to_string())
        } else {
            (
                ProcessingStatus::Success,
                "Successfully processed ID card text and face.".to_string(),
            )
        };

        self.id_card_processing = IdCardProcessing { status, message };
    }

    pub(crate) fn record_liveness(&mut self, outcome: &LivenessOutcome) {
        self.liveness_check = LivenessCheck {
            passed: outcome.passed,
            status: LivenessStage::Completed(outcome.status),
            message: outcome.message.clone(),
        };
    }

    pub(crate) fn record_match(&mut self, outcome: &MatchOutcome) {
        self.face_verification = FaceVerification {
            verified: outcome.verified,
            status: MatchStage::Completed(outcome.status),
            message: outcome.message.clone(),
            distance: outcome.distance.map(|d| format!("{d:.4}")),
            threshold: Some(format!("{:.4}", outcome.threshold)),
            model: Some(outcome.model.clone()),
            metric: Some(outcome.metric.clone()),
        };
    }

    pub(crate) fn record_storage(&mut self, outcome: &StoreOutcome) {
        self.database_storage = DatabaseStorage {
            stored: outcome.stored,
            status: StorageStage::Attempted,
            message: outcome.message.clone(),
        };
    }

    pub(crate) fn skip_after_extraction(&mut self) {
        self.liveness_check.status = LivenessStage::SkippedIdProcessingFailed;
        self.face_verification.status = MatchStage::SkippedIdProcessingFailed;
        self.skip_storage("Skipped due to ID processing failure.");
    }

    pub(crate) fn skip_after_liveness(&mut self) {
        self.face_verification.status = MatchStage::SkippedLivenessFailed;
        self.skip_storage("Skipped due to liveness failure.");
    }

    pub(crate) fn skip_storage(&mut self, message: &str) {
        self.database_storage.status = StorageStage::Skipped;
        self.database_storage.message = message.to_string();
    }

    /// Fill in blanks after an unhandled failure, keeping what earlier stages reported
    pub(crate) fn mark_unhandled(&mut self) {
        self.overall_status = "Server Error: An unexpected error occurred.".to_string();
        if self.id_card_processing.message.is_empty() {
            self.id_card_processing.message =
                "Error occurred before or during this step.".to_string();
        }
        if self.database_storage.status == StorageStage::NotAttempted {
            self.database_storage.message =
                "Database operation not reached due to an earlier error.".to_string();
        }
    }
}
