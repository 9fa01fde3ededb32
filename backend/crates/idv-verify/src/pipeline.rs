use crate::{
    DocumentExtractor, FaceMatcher, FaceModel, LivenessChecker, LivenessStatus, Metrics,
    MetricsTimer, Result as VerifyErrorResult, TempUpload, VerificationResult, VerifyError,
    VisionModel,
};

use idv_config::{Config, ConfigErrorResult};
use idv_db::IdentityRepository;

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use http::StatusCode;
use log::{error, info, warn};

/// Settings the pipeline needs, resolved from [`Config`]
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub match_threshold: f64,
    pub embedding_dimension: usize,
    pub face_contrast: f32,
    pub liveness_reference: PathBuf,
    /// Where uploads and face crops are written
    pub scratch_dir: PathBuf,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> ConfigErrorResult<Self> {
        Ok(Self {
            match_threshold: config.verification.match_threshold,
            embedding_dimension: config.face.embedding_dimension,
            face_contrast: config.verification.face_contrast,
            liveness_reference: config.liveness_reference_path()?,
            scratch_dir: config.upload_dir()?,
        })
    }
}

/// Terminal result of one verification request
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    pub status: StatusCode,
    pub result: VerificationResult,
}

/// Runs extraction, liveness, face match and storage in strict order.
///
/// Each stage gates the next. Partial results are always returned, and the
/// uploads are removed however the run ends.
pub struct VerificationPipeline {
    extractor: DocumentExtractor,
    liveness: LivenessChecker,
    matcher: FaceMatcher,
    repository: IdentityRepository,
    scratch_dir: PathBuf,
    metrics: Metrics,
}

impl VerificationPipeline {
    /// Extractor and matcher share `face_model` so embeddings stay comparable.
    pub fn new(
        settings: PipelineSettings,
        vision: Arc<dyn VisionModel>,
        face_model: Arc<dyn FaceModel>,
        repository: IdentityRepository,
    ) -> Self {
        Self {
            extractor: DocumentExtractor::new(
                vision,
                face_model.clone(),
                settings.face_contrast,
                settings.scratch_dir.clone(),
            ),
            liveness: LivenessChecker::new(face_model.clone(), settings.liveness_reference),
            matcher: FaceMatcher::new(
                face_model,
                settings.match_threshold,
                settings.embedding_dimension,
            ),
            repository,
            scratch_dir: settings.scratch_dir,
            metrics: Metrics::new(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn repository(&self) -> &IdentityRepository {
        &self.repository
    }

    pub fn is_ocr_available(&self) -> bool {
        self.extractor.is_ocr_available()
    }

    /// Verify `live_face` against `document`. Both uploads are deleted before returning.
    pub async fn run(&self, document: TempUpload, live_face: TempUpload) -> VerificationOutcome {
        let mut result = VerificationResult::default();

        let status = if !self.extractor.is_ocr_available() {
            error!("OCR service unavailable; refusing verification request");
            result.overall_status = "Failed: OCR service not available.".to_string();
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            let stages = AssertUnwindSafe(self.run_stages(
                document.path(),
                live_face.path(),
                &mut result,
            ))
            .catch_unwind()
            .await;

            match stages {
                Ok(Ok(status)) => status,
                Ok(Err(VerifyError::OcrUnavailable { message, .. })) => {
                    error!("OCR service became unavailable: {message}");
                    result.overall_status = "Failed: OCR service not available.".to_string();
                    result.skip_after_extraction();
                    StatusCode::SERVICE_UNAVAILABLE
                }
                Ok(Err(e)) => {
                    error!("Unhandled error in verification pipeline: {e}");
                    self.metrics.unhandled_failure("error");
                    result.mark_unhandled();
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                Err(panic) => {
                    let panic_msg = match panic.downcast::<String>() {
                        Ok(msg) => *msg,
                        Err(any) => match any.downcast::<&str>() {
                            Ok(msg) => msg.to_string(),
                            Err(_) => "Unknown panic".to_string(),
                        },
                    };
                    error!("Verification pipeline panicked: {panic_msg}");
                    self.metrics.unhandled_failure("panic");
                    result.mark_unhandled();
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        };

        drop(document);
        drop(live_face);

        self.metrics.request_completed(status.as_u16());
        info!(
            "Finished verification request: {} ({})",
            result.overall_status, status
        );

        VerificationOutcome { status, result }
    }

    async fn run_stages(
        &self,
        document: &Path,
        live_face: &Path,
        result: &mut VerificationResult,
    ) -> VerifyErrorResult<StatusCode> {
        // Stage 1: document text and portrait embedding
        let timer = MetricsTimer::new(self.metrics.clone(), "extraction");
        let extraction = match self.extractor.extract(document).await {
            Ok(extraction) => extraction,
            Err(e) => {
                self.metrics.stage_outcome("extraction", "error");
                return Err(e);
            }
        };
        timer.finish();

        result.record_extraction(&extraction.details, extraction.embedding.is_some());

        let Some(embedding) = extraction.embedding else {
            warn!(
                "ID card processing failed: {}",
                result.id_card_processing.message
            );
            self.metrics.stage_outcome("extraction", "failed");
            result.skip_after_extraction();
            result.overall_status = "Failed: Critical error in ID card processing.".to_string();
            return Ok(StatusCode::UNPROCESSABLE_ENTITY);
        };
        self.metrics.stage_outcome("extraction", "success");

        // Stage 2: liveness
        let timer = MetricsTimer::new(self.metrics.clone(), "liveness");
        let liveness = self.liveness.check(live_face).await;
        timer.finish();

        result.record_liveness(&liveness);
        self.metrics
            .stage_outcome("liveness", liveness.status.as_str());

        if liveness.status == LivenessStatus::ConfigurationError {
            result.skip_after_liveness();
            result.overall_status =
                "Failed: Liveness check unavailable (system configuration error).".to_string();
            return Ok(StatusCode::SERVICE_UNAVAILABLE);
        }

        if !liveness.passed {
            result.skip_after_liveness();
            result.overall_status = "Failed: Liveness check failed.".to_string();
            return Ok(StatusCode::FORBIDDEN);
        }

        // Stage 3: live face against the document embedding
        let timer = MetricsTimer::new(self.metrics.clone(), "face_match");
        let face_match = self.matcher.verify(live_face, Some(&embedding)).await;
        timer.finish();

        result.record_match(&face_match);

        if !face_match.verified {
            self.metrics.stage_outcome("face_match", "failed");
            result.skip_storage("Skipped due to face verification failure.");
            result.overall_status = "Failed: Face verification failed.".to_string();
            return Ok(StatusCode::BAD_REQUEST);
        }
        self.metrics.stage_outcome("face_match", "verified");

        // Stage 4: storage
        let timer = MetricsTimer::new(self.metrics.clone(), "storage");
        let stored = self
            .repository
            .store(&extraction.details, Some(&embedding))
            .await;
        timer.finish();

        result.record_storage(&stored);

        if stored.stored {
            self.metrics.stage_outcome("storage", "stored");
            result.overall_status = "Success: All checks passed and data stored.".to_string();
            Ok(StatusCode::OK)
        } else {
            self.metrics.stage_outcome("storage", "failed");
            error!("Database storage failed: {}", stored.message);
            result.overall_status =
                "Partial Success: Verification passed but database storage failed.".to_string();
            Ok(StatusCode::MULTI_STATUS)
        }
    }
}
