use super::{png_bytes, test_embedding};

use idv_core::FaceEmbedding;
use idv_verify::{
    DetectedFace, FaceComparison, FaceModel, FaceModelError, FaceModelResult, FaceReference,
    VisionError, VisionModel, VisionResult,
};

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

/// What the fake OCR model answers
#[derive(Clone)]
pub enum VisionScript {
    Reply(String),
    Unreachable,
    ApiError,
}

pub struct FakeVision {
    available: bool,
    script: VisionScript,
    calls: Mutex<usize>,
}

impl FakeVision {
    pub fn replying(reply: &str) -> Self {
        Self::scripted(VisionScript::Reply(reply.to_string()))
    }

    pub fn scripted(script: VisionScript) -> Self {
        Self {
            available: true,
            script,
            calls: Mutex::new(0),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            available: false,
            ..Self::scripted(VisionScript::Unreachable)
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl VisionModel for FakeVision {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(&self, image: &[u8], mime_type: &str, _prompt: &str) -> VisionResult<String> {
        *self.calls.lock().unwrap() += 1;
        assert_eq!(mime_type, "image/jpeg");
        assert!(image::load_from_memory(image).is_ok(), "OCR input must be a valid image");

        match &self.script {
            VisionScript::Reply(reply) => Ok(reply.clone()),
            VisionScript::Unreachable => Err(VisionError::unavailable("connection refused")),
            VisionScript::ApiError => Err(VisionError::api(400, "API key not valid")),
        }
    }
}

#[derive(Clone)]
pub enum FacesScript {
    One,
    Empty,
    NotDetected,
    ServiceDown,
}

#[derive(Clone)]
pub enum EmbedScript {
    Embedding(FaceEmbedding),
    Failed,
}

#[derive(Clone)]
pub enum CompareScript {
    Distance(f64),
    /// Comparator reports its own verdict, which callers must ignore
    Verdict { verified: bool, distance: f64 },
    SpoofFlag,
    SpoofError,
    NotDetected,
    ServiceError,
    Panic,
}

pub struct FakeFaceModel {
    pub faces: FacesScript,
    pub embed: EmbedScript,
    pub liveness: CompareScript,
    pub matching: CompareScript,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) embedded_paths: Mutex<Vec<PathBuf>>,
}

impl Default for FakeFaceModel {
    fn default() -> Self {
        Self {
            faces: FacesScript::One,
            embed: EmbedScript::Embedding(test_embedding()),
            liveness: CompareScript::Distance(0.8),
            matching: CompareScript::Distance(0.21),
            calls: Mutex::new(Vec::new()),
            embedded_paths: Mutex::new(Vec::new()),
        }
    }
}

impl FakeFaceModel {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Files handed to `represent`
    pub fn embedded_paths(&self) -> Vec<PathBuf> {
        self.embedded_paths.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn compare(script: &CompareScript) -> FaceModelResult<FaceComparison> {
    match script {
        CompareScript::Distance(distance) => Ok(FaceComparison {
            verified: false,
            distance: *distance,
            threshold: 0.99,
            is_spoof: Some(false),
        }),
        CompareScript::Verdict { verified, distance } => Ok(FaceComparison {
            verified: *verified,
            distance: *distance,
            threshold: 0.99,
            is_spoof: None,
        }),
        CompareScript::SpoofFlag => Ok(FaceComparison {
            verified: true,
            distance: 0.1,
            threshold: 0.4,
            is_spoof: Some(true),
        }),
        CompareScript::SpoofError => Err(FaceModelError::spoof_detected(
            "Spoof detected in given image.",
        )),
        CompareScript::NotDetected => Err(FaceModelError::face_not_detected(
            "Face could not be detected in img1",
        )),
        CompareScript::ServiceError => Err(FaceModelError::from_service_message(
            500,
            "model crashed".to_string(),
        )),
        CompareScript::Panic => panic!("face model exploded"),
    }
}

#[async_trait]
impl FaceModel for FakeFaceModel {
    fn model_name(&self) -> &str {
        "Facenet"
    }

    fn distance_metric(&self) -> &str {
        "cosine"
    }

    async fn extract_faces(&self, _image: &Path) -> FaceModelResult<Vec<DetectedFace>> {
        self.record("extract_faces");
        match self.faces {
            FacesScript::One => Ok(vec![DetectedFace {
                image: png_bytes(),
                confidence: 0.99,
            }]),
            FacesScript::Empty => Ok(Vec::new()),
            FacesScript::NotDetected => Err(FaceModelError::face_not_detected(
                "Face could not be detected in numpy array",
            )),
            FacesScript::ServiceDown => Err(FaceModelError::from_service_message(
                503,
                "service down".to_string(),
            )),
        }
    }

    async fn represent(&self, image: &Path) -> FaceModelResult<FaceEmbedding> {
        self.record("represent");
        assert!(image.exists(), "face crop must exist while embedding");
        self.embedded_paths.lock().unwrap().push(image.to_path_buf());

        match &self.embed {
            EmbedScript::Embedding(embedding) => Ok(embedding.clone()),
            EmbedScript::Failed => Err(FaceModelError::embedding_failed(
                "Embedding for face could not be generated",
            )),
        }
    }

    async fn verify(
        &self,
        live: &Path,
        reference: FaceReference<'_>,
        anti_spoofing: bool,
    ) -> FaceModelResult<FaceComparison> {
        assert!(live.exists(), "live image must exist during comparison");

        if anti_spoofing {
            self.record("liveness");
            assert!(matches!(reference, FaceReference::Image(_)));
            compare(&self.liveness)
        } else {
            self.record("match");
            assert!(matches!(reference, FaceReference::Embedding(_)));
            compare(&self.matching)
        }
    }
}
