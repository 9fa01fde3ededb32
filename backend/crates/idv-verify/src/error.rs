use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of the OCR/vision collaborator
#[derive(Error, Debug)]
pub enum VisionError {
    /// Not configured or unreachable
    #[error("OCR service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("OCR request failed: {message} {location}")]
    Request {
        message: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("OCR service returned {status}: {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid OCR response: {message} {location}")]
    InvalidResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl VisionError {
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Connection and timeout failures count as "unavailable"
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return Self::unavailable(err.to_string());
        }
        Self::Request {
            message: err.to_string(),
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message without the source location, for API responses
    pub fn detail(&self) -> String {
        match self {
            Self::Unavailable { message, .. }
            | Self::Request { message, .. }
            | Self::InvalidResponse { message, .. } => message.clone(),
            Self::Api {
                status, message, ..
            } => format!("{status}: {message}"),
        }
    }
}

/// Failures of the face detection/embedding/distance collaborator
#[derive(Error, Debug)]
pub enum FaceModelError {
    #[error("Face could not be detected: {message} {location}")]
    FaceNotDetected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Spoof detected: {message} {location}")]
    SpoofDetected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Embedding could not be generated: {message} {location}")]
    EmbeddingFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Face service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Face service returned {status}: {message} {location}")]
    Service {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid face service response: {message} {location}")]
    InvalidResponse {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl FaceModelError {
    #[track_caller]
    pub fn face_not_detected(message: impl Into<String>) -> Self {
        Self::FaceNotDetected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn spoof_detected(message: impl Into<String>) -> Self {
        Self::SpoofDetected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn embedding_failed(message: impl Into<String>) -> Self {
        Self::EmbeddingFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let message = err.to_string();
        let location = ErrorLocation::from(Location::caller());
        if err.is_connect() || err.is_timeout() {
            Self::Unavailable { message, location }
        } else if err.is_decode() {
            Self::InvalidResponse { message, location }
        } else {
            Self::Service {
                status: err.status().map_or(0, |s| s.as_u16()),
                message,
                location,
            }
        }
    }

    /// Classify an error reported by the service in its `{"error": "..."}` body.
    #[track_caller]
    pub fn from_service_message(status: u16, message: String) -> Self {
        let lowered = message.to_lowercase();
        if message.contains("Spoof detected") {
            Self::spoof_detected(message)
        } else if lowered.contains("face could not be detected") {
            Self::face_not_detected(message)
        } else if lowered.contains("could not be generated") {
            Self::embedding_failed(message)
        } else {
            Self::Service {
                status,
                message,
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }

    /// Message without the source location, for API responses
    pub fn detail(&self) -> String {
        match self {
            Self::FaceNotDetected { message, .. }
            | Self::SpoofDetected { message, .. }
            | Self::EmbeddingFailed { message, .. }
            | Self::Unavailable { message, .. }
            | Self::InvalidResponse { message, .. } => message.clone(),
            Self::Service {
                status, message, ..
            } => format!("{status}: {message}"),
            Self::Io { path, source, .. } => format!("{}: {}", path.display(), source),
        }
    }
}

/// Pipeline-level failures. Stage failures are reported in the result, not here.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("OCR service not available: {message} {location}")]
    OcrUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Background task failed: {source} {location}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl VerifyError {
    #[track_caller]
    pub fn ocr_unavailable(message: impl Into<String>) -> Self {
        Self::OcrUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio::task::JoinError> for VerifyError {
    #[track_caller]
    fn from(source: tokio::task::JoinError) -> Self {
        Self::Task {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type VisionResult<T> = std::result::Result<T, VisionError>;
pub type FaceModelResult<T> = std::result::Result<T, FaceModelError>;
pub type Result<T> = std::result::Result<T, VerifyError>;
