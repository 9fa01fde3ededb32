use crate::FaceModelResult;

use idv_core::FaceEmbedding;

use std::path::Path;

use async_trait::async_trait;

/// A face found in an image
#[derive(Debug, Clone)]
pub struct DetectedFace {
    /// Encoded (JPEG/PNG) crop of the aligned face
    pub image: Vec<u8>,
    pub confidence: f64,
}

/// What the live face is compared against
#[derive(Debug, Clone, Copy)]
pub enum FaceReference<'a> {
    Image(&'a Path),
    Embedding(&'a FaceEmbedding),
}

/// Raw comparator verdict. Callers apply their own threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceComparison {
    pub verified: bool,
    pub distance: f64,
    pub threshold: f64,
    /// Present when anti-spoofing was requested
    pub is_spoof: Option<bool>,
}

/// Face detection, embedding and distance model.
///
/// Embeddings from one implementation are only comparable with embeddings
/// from the same implementation.
#[async_trait]
pub trait FaceModel: Send + Sync {
    fn model_name(&self) -> &str;

    fn distance_metric(&self) -> &str;

    /// Detect and align faces, best first
    async fn extract_faces(&self, image: &Path) -> FaceModelResult<Vec<DetectedFace>>;

    /// Embedding of the (single) face in `image`
    async fn represent(&self, image: &Path) -> FaceModelResult<FaceEmbedding>;

    /// Distance between the face in `live` and `reference`
    async fn verify(
        &self,
        live: &Path,
        reference: FaceReference<'_>,
        anti_spoofing: bool,
    ) -> FaceModelResult<FaceComparison>;
}
