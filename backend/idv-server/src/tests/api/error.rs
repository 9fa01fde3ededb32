use crate::ApiError;

use idv_core::CoreError;
use idv_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = body_json(ApiError::NotFound {
        message: "No identity".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "No identity");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let (status, json) = body_json(ApiError::validation("bad file", "id_card_image")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "id_card_image");
}

#[tokio::test]
async fn test_payload_too_large_returns_413() {
    let (status, json) = body_json(ApiError::PayloadTooLarge {
        message: "too big".into(),
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_invalid_id_type_maps_to_validation_on_id_type() {
    let core = "passport".parse::<idv_core::IdType>().unwrap_err();

    let (status, json) = body_json(ApiError::from(core)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "id_type");
    assert!(json["error"]["message"].as_str().unwrap().contains("passport"));
}

#[tokio::test]
async fn test_db_error_hides_details() {
    let db = DbError::Initialization {
        message: "disk on fire at /var/secret".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(ApiError::from(db)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["message"], "Database operation failed");
}

#[tokio::test]
async fn test_wrapped_core_error_keeps_validation_mapping() {
    let core = CoreError::InvalidIdType {
        value: "ssn".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, _) = body_json(ApiError::from(DbError::Core(core))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
