use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid card type: {value} {location}")]
    InvalidCardType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid identifier type: {value} {location}")]
    InvalidIdType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid face embedding: {message} {location}")]
    InvalidEmbedding {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid OCR payload: {message} {location}")]
    InvalidOcrPayload {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON error: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
