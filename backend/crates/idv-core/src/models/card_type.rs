use crate::{CoreError, IdType, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Identity document families the OCR prompt is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[serde(rename = "Aadhaar card")]
    Aadhaar,
    #[serde(rename = "Voter ID")]
    VoterId,
    #[serde(rename = "PAN card")]
    Pan,
    #[serde(rename = "Driving License")]
    DrivingLicense,
}

impl CardType {
    pub const ALL: [CardType; 4] = [
        CardType::Aadhaar,
        CardType::VoterId,
        CardType::Pan,
        CardType::DrivingLicense,
    ];

    /// Label exactly as the OCR prompt spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar card",
            Self::VoterId => "Voter ID",
            Self::Pan => "PAN card",
            Self::DrivingLicense => "Driving License",
        }
    }

    /// The identifier column that is authoritative for this document type
    pub fn id_type(&self) -> IdType {
        match self {
            Self::Aadhaar => IdType::Aadhaar,
            Self::VoterId => IdType::VoterId,
            Self::Pan => IdType::Pan,
            Self::DrivingLicense => IdType::License,
        }
    }
}

impl FromStr for CardType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|card_type| card_type.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::InvalidCardType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
