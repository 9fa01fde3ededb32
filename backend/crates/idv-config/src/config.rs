use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, FaceConfig, LoggingConfig, OcrConfig, ServerConfig, UploadConfig,
    VerificationConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

/// Fallback variable for the OCR key, read when `IDV_OCR_API_KEY` is unset
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub ocr: OcrConfig,
    pub face: FaceConfig,
    pub verification: VerificationConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDV_CONFIG_DIR env var, else use ./.idv/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDV_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDV_CONFIG_DIR env var > ./.idv/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.ocr.validate()?;
        self.face.validate()?;
        self.verification.validate()?;
        self.upload.validate()?;
        Ok(())
    }

    /// Absolute path to the SQLite file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Liveness reference image; relative paths resolve against the config dir.
    pub fn liveness_reference_path(&self) -> ConfigErrorResult<PathBuf> {
        Self::resolve(&self.verification.liveness_reference_image)
    }

    /// Upload scratch directory; relative paths resolve against the config dir.
    pub fn upload_dir(&self) -> ConfigErrorResult<PathBuf> {
        Self::resolve(&self.upload.dir)
    }

    fn resolve(path: &str) -> ConfigErrorResult<PathBuf> {
        let path = Path::new(path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(Self::config_dir()?.join(path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  ocr: {} at {} (api key: {}, timeout={}s)",
            self.ocr.model,
            self.ocr.base_url,
            if self.ocr.is_configured() {
                "set"
            } else {
                "missing"
            },
            self.ocr.timeout_secs
        );
        info!(
            "  face: {}/{} via {} (detector={}, dim={}, timeout={}s)",
            self.face.model_name,
            self.face.distance_metric,
            self.face.base_url,
            self.face.detector_backend,
            self.face.embedding_dimension,
            self.face.timeout_secs
        );
        info!(
            "  verification: threshold={:.4}, reference={}, contrast={}",
            self.verification.match_threshold,
            self.verification.liveness_reference_image,
            self.verification.face_contrast
        );
        info!(
            "  upload: dir={}, max={} bytes, extensions={}",
            self.upload.dir,
            self.upload.max_bytes,
            self.upload.allowed_extensions.join(",")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDV_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDV_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDV_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDV_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("IDV_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDV_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDV_LOG_FILE", &mut self.logging.file);

        // OCR
        Self::apply_env_string("IDV_OCR_BASE_URL", &mut self.ocr.base_url);
        Self::apply_env_string("IDV_OCR_MODEL", &mut self.ocr.model);
        Self::apply_env_parse("IDV_OCR_TIMEOUT_SECS", &mut self.ocr.timeout_secs);
        if std::env::var("IDV_OCR_API_KEY").is_ok() {
            Self::apply_env_option_string("IDV_OCR_API_KEY", &mut self.ocr.api_key);
        } else if self.ocr.api_key.is_none() {
            Self::apply_env_option_string(GEMINI_API_KEY_ENV, &mut self.ocr.api_key);
        }

        // Face
        Self::apply_env_string("IDV_FACE_BASE_URL", &mut self.face.base_url);
        Self::apply_env_string("IDV_FACE_MODEL_NAME", &mut self.face.model_name);
        Self::apply_env_string(
            "IDV_FACE_DETECTOR_BACKEND",
            &mut self.face.detector_backend,
        );
        Self::apply_env_string("IDV_FACE_DISTANCE_METRIC", &mut self.face.distance_metric);
        Self::apply_env_parse(
            "IDV_FACE_EMBEDDING_DIMENSION",
            &mut self.face.embedding_dimension,
        );
        Self::apply_env_parse("IDV_FACE_TIMEOUT_SECS", &mut self.face.timeout_secs);

        // Verification
        Self::apply_env_parse(
            "IDV_MATCH_THRESHOLD",
            &mut self.verification.match_threshold,
        );
        Self::apply_env_string(
            "IDV_LIVENESS_REFERENCE_IMAGE",
            &mut self.verification.liveness_reference_image,
        );
        Self::apply_env_parse("IDV_FACE_CONTRAST", &mut self.verification.face_contrast);

        // Upload
        Self::apply_env_string("IDV_UPLOAD_DIR", &mut self.upload.dir);
        Self::apply_env_parse("IDV_UPLOAD_MAX_BYTES", &mut self.upload.max_bytes);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
