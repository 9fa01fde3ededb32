pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::card_type::CardType;
pub use models::extracted_details::ExtractedDetails;
pub use models::face_embedding::FaceEmbedding;
pub use models::id_type::IdType;
pub use models::identity_record::IdentityRecord;
