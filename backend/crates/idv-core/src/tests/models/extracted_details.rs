use crate::{CardType, ExtractedDetails, IdType};

use googletest::prelude::*;
use serde_json::json;

#[googletest::test]
fn given_aadhaar_ocr_object_when_parsed_then_known_fields_read() {
    let value = json!({
        "card_type": "Aadhaar card",
        "name": "Asha Verma",
        "dob": "01-02-1990",
        "aadhaar_no": "7514 9018 5308",
        "unexpected": "ignored"
    });

    let details = ExtractedDetails::from_ocr_value(&value).unwrap();

    expect_that!(details.card_type(), some(eq(CardType::Aadhaar)));
    expect_that!(details.name.as_deref(), some(eq("Asha Verma")));
    expect_that!(details.normalized_id(IdType::Aadhaar), some(eq("751490185308")));
    expect_that!(details.pan_no, none());
    expect_that!(details.is_empty(), eq(false));
}

#[googletest::test]
fn given_numeric_and_null_values_when_parsed_then_numbers_stringified_nulls_dropped() {
    let value = json!({
        "card_type": "Aadhaar card",
        "aadhaar_no": 751490185308u64,
        "pan_no": null,
        "license_no": "   ",
    });

    let details = ExtractedDetails::from_ocr_value(&value).unwrap();

    expect_that!(details.aadhaar_no.as_deref(), some(eq("751490185308")));
    expect_that!(details.pan_no, none());
    expect_that!(details.license_no, none());
}

#[googletest::test]
fn given_placeholder_values_when_parsed_then_treated_as_absent() {
    let value = json!({
        "card_type": "PAN card",
        "pan_no": "ABCPE1234F",
        "aadhaar_no": "N/A",
        "license_no": " null ",
        "voter_id_number": "-",
        "expiration_date": "Not Applicable",
    });

    let details = ExtractedDetails::from_ocr_value(&value).unwrap();

    expect_that!(details.pan_no.as_deref(), some(eq("ABCPE1234F")));
    expect_that!(details.aadhaar_no, none());
    expect_that!(details.license_no, none());
    expect_that!(details.voter_id_number, none());
    expect_that!(details.expiration_date, none());
    expect_that!(details.normalized_id(IdType::Aadhaar), none());
}

#[googletest::test]
fn given_non_object_when_parsed_then_error() {
    expect_that!(
        ExtractedDetails::from_ocr_value(&json!(["a", "b"])),
        err(anything())
    );
}

#[googletest::test]
fn given_unparseable_reply_then_parse_error_and_raw_text_kept() {
    let details = ExtractedDetails::unparseable("not json");

    expect_that!(details.is_empty(), eq(true));
    expect_that!(details.text_failure(), some(eq("Failed to parse OCR details")));
    expect_that!(details.raw_ocr.as_deref(), some(eq("not json")));
}

#[test]
fn test_diagnostics_serialize_with_wire_names() {
    let details = ExtractedDetails {
        name: Some("Ravi".to_string()),
        face_detection_error: Some("No face detected on ID card".to_string()),
        ..ExtractedDetails::default()
    };

    let value = serde_json::to_value(&details).unwrap();

    assert_eq!(value["name"], "Ravi");
    assert_eq!(value["id_face_detection_error"], "No face detected on ID card");
    assert!(value.get("card_type").is_none());
    assert!(value.get("error").is_none());
}
