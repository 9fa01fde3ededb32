pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    identities::{
        identities::get_identity, identity_dto::IdentityDto, identity_response::IdentityResponse,
    },
    verification::{
        uploaded_image::UploadedImage,
        verification::{ID_CARD_FIELD, LIVE_FACE_FIELD, process_and_verify},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
