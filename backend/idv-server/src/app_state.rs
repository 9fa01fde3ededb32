use idv_config::UploadConfig;
use idv_verify::VerificationPipeline;

use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<VerificationPipeline>,
    pub upload: UploadConfig,
}
