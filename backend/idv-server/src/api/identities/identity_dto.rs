use idv_core::IdentityRecord;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IdentityDto {
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
    pub face_embedding: Option<Vec<f64>>,
    pub registration_timestamp: String,
}

impl From<IdentityRecord> for IdentityDto {
    fn from(record: IdentityRecord) -> Self {
        Self {
            id: record.id,
            card_type: record.card_type,
            name: record.name,
            dob: record.dob,
            aadhaar_no: record.aadhaar_no,
            pan_no: record.pan_no,
            license_no: record.license_no,
            voter_id_number: record.voter_id_number,
            expiration_date: record.expiration_date,
            father_mother_name: record.father_mother_name,
            face_embedding: record.face_embedding.map(|e| e.as_slice().to_vec()),
            registration_timestamp: record.registered_at.to_rfc3339(),
        }
    }
}
