//! Verification REST handler
//!
//! Accepts the document and selfie as multipart form data and runs the
//! verification pipeline on them.

use crate::{ApiError, ApiResult, AppState, UploadedImage};

use idv_verify::{TempUpload, VerificationResult};

use std::panic::Location;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use error_location::ErrorLocation;
use log::info;

pub const ID_CARD_FIELD: &str = "id_card_image";
pub const LIVE_FACE_FIELD: &str = "live_face_image";

/// POST /process_and_verify
///
/// The status code reflects the stage that decided the outcome; the body
/// always carries the per-stage results.
pub async fn process_and_verify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<VerificationResult>)> {
    let mut id_card = None;
    let mut live_face = None;

    while let Some(field) = multipart.next_field().await? {
        let (slot, name) = match field.name() {
            Some(ID_CARD_FIELD) => (&mut id_card, ID_CARD_FIELD),
            Some(LIVE_FACE_FIELD) => (&mut live_face, LIVE_FACE_FIELD),
            _ => continue,
        };

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        *slot = Some(UploadedImage {
            field: name,
            file_name,
            bytes,
        });
    }

    let (Some(id_card), Some(live_face)) = (id_card, live_face) else {
        return Err(ApiError::BadRequest {
            message: format!("Missing '{ID_CARD_FIELD}' or '{LIVE_FACE_FIELD}' in request"),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    id_card.validate(&state.upload)?;
    live_face.validate(&state.upload)?;

    info!(
        "Verification request: document '{}' ({} bytes), selfie '{}' ({} bytes)",
        id_card.file_name,
        id_card.bytes.len(),
        live_face.file_name,
        live_face.bytes.len()
    );

    // Dropping a TempUpload removes its file, so an early return cleans up
    let scratch_dir = state.pipeline.scratch_dir();
    let document = TempUpload::persist(scratch_dir, &id_card.file_name, &id_card.bytes).await?;
    let selfie = TempUpload::persist(scratch_dir, &live_face.file_name, &live_face.bytes).await?;

    let outcome = state.pipeline.run(document, selfie).await;

    Ok((outcome.status, Json(outcome.result)))
}
