#![allow(dead_code)]

//! Test infrastructure for idv-server API tests

use idv_config::UploadConfig;
use idv_core::FaceEmbedding;
use idv_db::IdentityRepository;
use idv_server::AppState;
use idv_verify::{
    DetectedFace, FaceComparison, FaceModel, FaceModelError, FaceModelResult, FaceReference,
    PipelineSettings, VerificationPipeline, VisionModel, VisionResult,
};

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

pub const BOUNDARY: &str = "idv-test-boundary";

pub const PAN_REPLY: &str =
    r#"{"card_type": "PAN card", "name": "Priya Sharma", "dob": "12/03/1988", "pan_no": "abcde1234f"}"#;

/// OCR fake returning a fixed reply
pub struct ScriptedVision {
    pub reply: String,
}

#[async_trait]
impl VisionModel for ScriptedVision {
    fn is_available(&self) -> bool {
        true
    }

    async fn generate(&self, _image: &[u8], _mime: &str, _prompt: &str) -> VisionResult<String> {
        Ok(self.reply.clone())
    }
}

/// Face fake: one face on every document, fixed embedding, fixed match distance
pub struct ScriptedFaceModel {
    pub match_distance: f64,
    pub spoof: bool,
}

#[async_trait]
impl FaceModel for ScriptedFaceModel {
    fn model_name(&self) -> &str {
        "Facenet"
    }

    fn distance_metric(&self) -> &str {
        "cosine"
    }

    async fn extract_faces(&self, _image: &Path) -> FaceModelResult<Vec<DetectedFace>> {
        Ok(vec![DetectedFace {
            image: png_bytes(),
            confidence: 0.99,
        }])
    }

    async fn represent(&self, _image: &Path) -> FaceModelResult<FaceEmbedding> {
        Ok(embedding())
    }

    async fn verify(
        &self,
        _live: &Path,
        _reference: FaceReference<'_>,
        anti_spoofing: bool,
    ) -> FaceModelResult<FaceComparison> {
        if anti_spoofing && self.spoof {
            return Err(FaceModelError::spoof_detected("Spoof detected in given image."));
        }
        Ok(FaceComparison {
            verified: true,
            distance: if anti_spoofing { 0.7 } else { self.match_distance },
            threshold: 0.4,
            is_spoof: Some(false),
        })
    }
}

pub fn embedding() -> FaceEmbedding {
    FaceEmbedding::new(vec![0.25, 0.5, 0.75, 1.0])
}

pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([200, 180, 160]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Test server state plus the handles tests inspect
pub struct TestContext {
    pub dir: TempDir,
    pub pool: SqlitePool,
    pub state: AppState,
}

impl TestContext {
    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn upload_entries(&self) -> usize {
        std::fs::read_dir(self.upload_dir()).unwrap().count()
    }

    pub fn repository(&self) -> IdentityRepository {
        IdentityRepository::new(self.pool.clone())
    }
}

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new().filename(":memory:");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    IdentityRepository::new(pool.clone())
        .ensure_schema()
        .await
        .expect("Failed to create schema");

    pool
}

/// Create AppState for testing
pub async fn create_test_context(face: ScriptedFaceModel) -> TestContext {
    create_test_context_with(face, UploadConfig::default()).await
}

pub async fn create_test_context_with(face: ScriptedFaceModel, upload: UploadConfig) -> TestContext {
    let dir = TempDir::new().unwrap();
    let scratch_dir = dir.path().join("uploads");
    std::fs::create_dir_all(&scratch_dir).unwrap();
    let reference = dir.path().join("reference.png");
    std::fs::write(&reference, png_bytes()).unwrap();

    let pool = create_test_pool().await;
    let pipeline = VerificationPipeline::new(
        PipelineSettings {
            match_threshold: 0.4,
            embedding_dimension: 4,
            face_contrast: 25.0,
            liveness_reference: reference,
            scratch_dir,
        },
        Arc::new(ScriptedVision {
            reply: PAN_REPLY.to_string(),
        }),
        Arc::new(face),
        IdentityRepository::new(pool.clone()),
    );

    TestContext {
        dir,
        pool,
        state: AppState {
            pipeline: Arc::new(pipeline),
            upload,
        },
    }
}

pub fn matching_face() -> ScriptedFaceModel {
    ScriptedFaceModel {
        match_distance: 0.2,
        spoof: false,
    }
}

/// One part of a multipart body: (field name, file name, content)
pub type Part<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
