mod config;
mod database_config;
mod error;
mod face_config;
mod log_level;
mod logging_config;
mod ocr_config;
mod server_config;
mod upload_config;
mod verification_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use face_config::FaceConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use ocr_config::OcrConfig;
pub use server_config::ServerConfig;
pub use upload_config::UploadConfig;
pub use verification_config::VerificationConfig;

const CONFIG_DIR_ENV: &str = "IDV_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".idv";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "identities.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const MIN_DATABASE_MAX_CONNECTIONS: u32 = 1;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 100;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

// Collaborator HTTP timeouts
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 600;
