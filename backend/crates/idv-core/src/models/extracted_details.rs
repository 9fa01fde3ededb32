//! Text fields read off an identity document, plus extraction diagnostics.

use crate::{CardType, CoreError, IdType, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message recorded when the OCR reply is not a JSON object
pub const PARSE_ERROR_MESSAGE: &str = "Failed to parse OCR details";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Father's or mother's name as printed on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_mother_name: Option<String>,

    /// Set when the OCR reply could not be parsed; `raw_ocr` keeps the text
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ocr: Option<String>,
    #[serde(
        rename = "id_face_detection_error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub face_detection_error: Option<String>,
    #[serde(
        rename = "id_face_embedding_error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub face_embedding_error: Option<String>,
    #[serde(
        rename = "id_processing_error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_error: Option<String>,
}

impl ExtractedDetails {
    /// Build details from the JSON object returned by the OCR model.
    ///
    /// Only the known keys are read. Numbers are stringified; `null`,
    /// empty strings, placeholders such as "N/A" and other value kinds
    /// count as absent.
    #[track_caller]
    pub fn from_ocr_value(value: &Value) -> CoreErrorResult<Self> {
        let object = value.as_object().ok_or_else(|| CoreError::InvalidOcrPayload {
            message: format!("expected a JSON object, got {}", json_kind(value)),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            card_type: text_field(object, "card_type"),
            name: text_field(object, "name"),
            dob: text_field(object, "dob"),
            aadhaar_no: text_field(object, "aadhaar_no"),
            pan_no: text_field(object, "pan_no"),
            license_no: text_field(object, "license_no"),
            voter_id_number: text_field(object, "voter_id_number"),
            expiration_date: text_field(object, "expiration_date"),
            father_mother_name: text_field(object, "father_mother_name"),
            ..Self::default()
        })
    }

    /// Details for an OCR reply that could not be parsed
    pub fn unparseable(raw_ocr: impl Into<String>) -> Self {
        Self {
            parse_error: Some(PARSE_ERROR_MESSAGE.to_string()),
            raw_ocr: Some(raw_ocr.into()),
            ..Self::default()
        }
    }

    /// True when no document text field was extracted
    pub fn is_empty(&self) -> bool {
        self.card_type.is_none()
            && self.name.is_none()
            && self.dob.is_none()
            && self.aadhaar_no.is_none()
            && self.pan_no.is_none()
            && self.license_no.is_none()
            && self.voter_id_number.is_none()
            && self.expiration_date.is_none()
            && self.father_mother_name.is_none()
    }

    /// Recognized card type, if the OCR label maps to one
    pub fn card_type(&self) -> Option<CardType> {
        self.card_type.as_deref().and_then(|s| s.parse().ok())
    }

    /// Raw identifier value for the given column
    pub fn id_value(&self, id_type: IdType) -> Option<&str> {
        match id_type {
            IdType::Aadhaar => self.aadhaar_no.as_deref(),
            IdType::Pan => self.pan_no.as_deref(),
            IdType::License => self.license_no.as_deref(),
            IdType::VoterId => self.voter_id_number.as_deref(),
        }
    }

    /// Identifier value after storage normalization
    pub fn normalized_id(&self, id_type: IdType) -> Option<String> {
        self.id_value(id_type).and_then(|raw| id_type.normalize(raw))
    }

    /// The error that made text extraction fail, if any
    pub fn text_failure(&self) -> Option<&str> {
        self.parse_error
            .as_deref()
            .or(self.processing_error.as_deref())
    }

    /// The error that prevented a face embedding, if any
    pub fn face_failure(&self) -> Option<&str> {
        self.face_detection_error
            .as_deref()
            .or(self.face_embedding_error.as_deref())
    }
}

/// Filler the OCR model writes for fields that do not apply
const PLACEHOLDERS: &[&str] = &[
    "n/a",
    "na",
    "null",
    "none",
    "nil",
    "-",
    "--",
    "not available",
    "not applicable",
];

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS
        .iter()
        .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty() && !is_placeholder(trimmed)).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
