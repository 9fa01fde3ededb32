//! Persisted identity - one row per enrolled person.

use crate::{FaceEmbedding, IdType};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: i64,
    pub card_type: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub aadhaar_no: Option<String>,
    pub pan_no: Option<String>,
    pub license_no: Option<String>,
    pub voter_id_number: Option<String>,
    pub expiration_date: Option<String>,
    pub father_mother_name: Option<String>,
    pub face_embedding: Option<FaceEmbedding>,
    /// Refreshed on every successful re-verification
    pub registered_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn id_value(&self, id_type: IdType) -> Option<&str> {
        match id_type {
            IdType::Aadhaar => self.aadhaar_no.as_deref(),
            IdType::Pan => self.pan_no.as_deref(),
            IdType::License => self.license_no.as_deref(),
            IdType::VoterId => self.voter_id_number.as_deref(),
        }
    }
}
