//! Identifier columns of the identity table.
//!
//! Each of the four columns is independently unique and nullable, so one
//! person can be enrolled through several documents without losing the
//! earlier linkage.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Aadhaar,
    Pan,
    License,
    VoterId,
}

impl IdType {
    pub const ALL: [IdType; 4] = [
        IdType::Aadhaar,
        IdType::Pan,
        IdType::License,
        IdType::VoterId,
    ];

    /// Column name in `user_id_details`
    pub fn column(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar_no",
            Self::Pan => "pan_no",
            Self::License => "license_no",
            Self::VoterId => "voter_id_number",
        }
    }

    /// Canonical form used for both storage and lookup.
    ///
    /// All whitespace is removed; PAN, license and voter numbers are
    /// upper-cased. Returns `None` when nothing is left.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        match self {
            Self::Aadhaar => Some(compact),
            Self::Pan | Self::License | Self::VoterId => Some(compact.to_uppercase()),
        }
    }
}

impl FromStr for IdType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "aadhaar" | "aadhaar_no" => Ok(Self::Aadhaar),
            "pan" | "pan_no" => Ok(Self::Pan),
            "license" | "license_no" => Ok(Self::License),
            "voter_id" | "voter_id_number" => Ok(Self::VoterId),
            _ => Err(CoreError::InvalidIdType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for IdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}
