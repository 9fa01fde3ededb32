#![allow(dead_code)]

pub mod fakes;

pub use fakes::*;

use idv_db::IdentityRepository;
use idv_verify::{PipelineSettings, TempUpload, VerificationPipeline};

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{ImageFormat, Rgb, RgbImage};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

pub const TEST_DIMENSION: usize = 4;
pub const TEST_THRESHOLD: f64 = 0.40;

/// Small valid PNG
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([120, 90, 60]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn test_embedding() -> idv_core::FaceEmbedding {
    idv_core::FaceEmbedding::new(vec![0.1, 0.2, 0.3, 0.4])
}

pub const VOTER_REPLY: &str = "```json\n{\"card_type\": \"Voter ID\", \"name\": \"Vikram Singh\", \"dob\": \"01-01-1990\", \"voter_id_number\": \"abc 1234567\"}\n```";

pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    IdentityRepository::new(pool.clone())
        .ensure_schema()
        .await
        .expect("Failed to create schema");

    pool
}

pub async fn count_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_id_details")
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Pipeline wired to fakes, a scratch directory and an in-memory store
pub struct Harness {
    pub dir: TempDir,
    pub pool: SqlitePool,
    pub vision: Arc<FakeVision>,
    pub face: Arc<FakeFaceModel>,
    pub pipeline: VerificationPipeline,
}

impl Harness {
    pub async fn new(vision: FakeVision, face: FakeFaceModel) -> Self {
        let dir = TempDir::new().unwrap();
        let scratch_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&scratch_dir).unwrap();

        let reference = dir.path().join("reference.png");
        std::fs::write(&reference, png_bytes()).unwrap();

        let settings = PipelineSettings {
            match_threshold: TEST_THRESHOLD,
            embedding_dimension: TEST_DIMENSION,
            face_contrast: 25.0,
            liveness_reference: reference,
            scratch_dir,
        };

        let pool = create_test_pool().await;
        let vision = Arc::new(vision);
        let face = Arc::new(face);
        let pipeline = VerificationPipeline::new(
            settings,
            vision.clone(),
            face.clone(),
            IdentityRepository::new(pool.clone()),
        );

        Self {
            dir,
            pool,
            vision,
            face,
            pipeline,
        }
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn reference_image(&self) -> PathBuf {
        self.dir.path().join("reference.png")
    }

    /// Save a document and a selfie as the server would
    pub async fn uploads(&self) -> (TempUpload, TempUpload) {
        let scratch = self.scratch_dir();
        let document = TempUpload::persist(&scratch, "card.png", &png_bytes())
            .await
            .unwrap();
        let selfie = TempUpload::persist(&scratch, "selfie.png", &png_bytes())
            .await
            .unwrap();
        (document, selfie)
    }

    pub fn scratch_entries(&self) -> usize {
        count_entries(&self.scratch_dir())
    }
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
