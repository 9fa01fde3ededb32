use crate::{ApiError, UploadedImage};

use idv_config::UploadConfig;

use axum::body::Bytes;

fn image(file_name: &str, bytes: &'static [u8]) -> UploadedImage {
    UploadedImage {
        field: "live_face_image",
        file_name: file_name.to_string(),
        bytes: Bytes::from_static(bytes),
    }
}

#[test]
fn test_allowed_extension_passes_case_insensitively() {
    let upload = UploadConfig::default();

    assert!(image("selfie.JPG", b"data").validate(&upload).is_ok());
    assert!(image("card.png", b"data").validate(&upload).is_ok());
}

#[test]
fn test_blank_file_name_rejected_with_field() {
    let upload = UploadConfig::default();

    let err = image("  ", b"data").validate(&upload).unwrap_err();

    match err {
        ApiError::Validation { field, message, .. } => {
            assert_eq!(field.as_deref(), Some("live_face_image"));
            assert!(message.contains("No selected file"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_disallowed_extension_rejected() {
    let upload = UploadConfig::default();

    let err = image("selfie.gif", b"data").validate(&upload).unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(err.to_string().contains("png, jpg, jpeg"));
}

#[test]
fn test_missing_extension_rejected() {
    let upload = UploadConfig::default();

    assert!(image("selfie", b"data").validate(&upload).is_err());
}

#[test]
fn test_empty_content_rejected() {
    let upload = UploadConfig::default();

    let err = image("selfie.png", b"").validate(&upload).unwrap_err();

    assert!(err.to_string().contains("is empty"));
}
