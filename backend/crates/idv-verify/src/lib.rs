pub mod collaborators;
pub mod document_extractor;
pub mod error;
pub mod face_matcher;
pub mod liveness_checker;
pub mod metrics;
pub mod metrics_timer;
pub mod pipeline;
pub mod temp_upload;
pub mod verification_result;

pub use collaborators::face_model::{DetectedFace, FaceComparison, FaceModel, FaceReference};
pub use collaborators::face_service_client::FaceServiceClient;
pub use collaborators::gemini_client::GeminiVisionClient;
pub use collaborators::vision_model::VisionModel;
pub use document_extractor::{DocumentExtractor, EXTRACTION_PROMPT, Extraction, parse_ocr_reply};
pub use error::{FaceModelError, FaceModelResult, Result, VerifyError, VisionError, VisionResult};
pub use face_matcher::{FaceMatcher, MatchOutcome, MatchStatus};
pub use liveness_checker::{LivenessChecker, LivenessOutcome, LivenessStatus};
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use pipeline::{PipelineSettings, VerificationOutcome, VerificationPipeline};
pub use temp_upload::{TempUpload, sanitize_filename};
pub use verification_result::{
    DatabaseStorage, FaceVerification, IdCardProcessing, LivenessCheck, LivenessStage, MatchStage,
    ProcessingStatus, StorageStage, VerificationResult,
};
