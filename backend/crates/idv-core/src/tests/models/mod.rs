mod card_type;
mod extracted_details;
mod face_embedding;
mod id_type;
