//! Identity lookup REST handler

use crate::{ApiError, ApiResult, AppState, IdentityResponse};

use idv_core::IdType;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use error_location::ErrorLocation;

/// GET /api/v1/identities/{id_type}/{value}
///
/// `id_type` is a column name (`aadhaar_no`, `pan_no`, `license_no`,
/// `voter_id_number`) or its short form. `value` is normalized before lookup.
pub async fn get_identity(
    State(state): State<AppState>,
    Path((id_type, value)): Path<(String, String)>,
) -> ApiResult<Json<IdentityResponse>> {
    let id_type: IdType = id_type.parse()?;

    let record = state
        .pipeline
        .repository()
        .fetch_by_identifier(&value, id_type)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("No identity with {} {}", id_type, value),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(IdentityResponse {
        identity: record.into(),
    }))
}
