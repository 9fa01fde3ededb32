use idv_core::{ExtractedDetails, FaceEmbedding};

/// Details as read off a voter card
pub fn voter_details(voter_id: &str, name: &str) -> ExtractedDetails {
    ExtractedDetails {
        card_type: Some("Voter ID".to_string()),
        name: Some(name.to_string()),
        dob: Some("01/01/1990".to_string()),
        voter_id_number: Some(voter_id.to_string()),
        father_mother_name: Some("Ramesh Kumar".to_string()),
        ..ExtractedDetails::default()
    }
}

pub fn aadhaar_details(aadhaar: &str, name: &str) -> ExtractedDetails {
    ExtractedDetails {
        card_type: Some("Aadhaar card".to_string()),
        name: Some(name.to_string()),
        dob: Some("15/08/1985".to_string()),
        aadhaar_no: Some(aadhaar.to_string()),
        ..ExtractedDetails::default()
    }
}

pub fn pan_details(pan: &str, name: &str) -> ExtractedDetails {
    ExtractedDetails {
        card_type: Some("PAN card".to_string()),
        name: Some(name.to_string()),
        dob: Some("02/02/1992".to_string()),
        pan_no: Some(pan.to_string()),
        ..ExtractedDetails::default()
    }
}

pub fn license_details(license: &str, name: &str) -> ExtractedDetails {
    ExtractedDetails {
        card_type: Some("Driving License".to_string()),
        name: Some(name.to_string()),
        dob: Some("03/03/1993".to_string()),
        license_no: Some(license.to_string()),
        expiration_date: Some("03/03/2033".to_string()),
        ..ExtractedDetails::default()
    }
}

/// A valid 128-dimension embedding whose values start at `seed`
pub fn embedding(seed: f64) -> FaceEmbedding {
    FaceEmbedding::new((0..128).map(|i| seed + i as f64 / 1000.0).collect())
}
