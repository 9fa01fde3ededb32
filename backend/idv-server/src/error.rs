use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] idv_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] idv_db::DbError),

    #[error("Failed to create OCR client: {0}")]
    Vision(#[from] idv_verify::VisionError),

    #[error("Failed to create face service client: {0}")]
    FaceModel(#[from] idv_verify::FaceModelError),

    #[error("Failed to prepare directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
