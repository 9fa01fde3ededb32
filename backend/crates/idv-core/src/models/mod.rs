pub mod card_type;
pub mod extracted_details;
pub mod face_embedding;
pub mod id_type;
pub mod identity_record;
