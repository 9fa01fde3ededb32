pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    identities::{
        identities::get_identity, identity_dto::IdentityDto, identity_response::IdentityResponse,
    },
    verification::{
        uploaded_image::UploadedImage,
        verification::{ID_CARD_FIELD, LIVE_FACE_FIELD, process_and_verify},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;

use crate::error::ServerError;

use idv_db::{IdentityRepository, create_pool};
use idv_verify::{FaceServiceClient, GeminiVisionClient, PipelineSettings, VerificationPipeline};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = idv_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = idv_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Directory {
            path: log_dir.display().to_string(),
            source: e,
        })?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting idv-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let settings = PipelineSettings::from_config(&config)?;
    std::fs::create_dir_all(&settings.scratch_dir).map_err(|e| ServerError::Directory {
        path: settings.scratch_dir.display().to_string(),
        source: e,
    })?;
    info!("Upload directory: {}", settings.scratch_dir.display());

    if !settings.liveness_reference.exists() {
        warn!(
            "Liveness reference image not found at {}; verification requests will fail with 503 until it is provided",
            settings.liveness_reference.display()
        );
    }

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = create_pool(&database_path, config.database.max_connections).await?;

    let repository = IdentityRepository::new(pool);
    repository.ensure_schema().await?;
    info!("Database schema ready");

    // Collaborator clients
    let vision = GeminiVisionClient::new(&config.ocr)?;
    if !config.ocr.is_configured() {
        error!("OCR API key not configured; verification requests will return 503");
    }
    let face_model = FaceServiceClient::new(&config.face)?;
    info!(
        "Face service: {} (model {}, metric {})",
        config.face.base_url, config.face.model_name, config.face.distance_metric
    );

    let pipeline = VerificationPipeline::new(
        settings,
        Arc::new(vision),
        Arc::new(face_model),
        repository,
    );

    let app_state = AppState {
        pipeline: Arc::new(pipeline),
        upload: config.upload.clone(),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
