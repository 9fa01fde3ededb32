use crate::FaceEmbedding;

use googletest::prelude::*;

#[googletest::test]
fn given_matching_dimension_when_validated_then_ok() {
    let embedding = FaceEmbedding::new(vec![0.25; 128]);
    expect_that!(embedding.validate(128), ok(anything()));
}

#[googletest::test]
fn given_wrong_dimension_when_validated_then_error_names_lengths() {
    let embedding = FaceEmbedding::new(vec![0.25; 64]);
    let err = embedding.validate(128).unwrap_err();
    expect_that!(err.to_string(), contains_substring("expected 128 values, found 64"));
}

#[googletest::test]
fn given_empty_or_non_finite_when_validated_then_error() {
    expect_that!(FaceEmbedding::new(vec![]).validate(128), err(anything()));

    let mut values = vec![0.1; 4];
    values[2] = f64::NAN;
    expect_that!(FaceEmbedding::new(values).validate(4), err(anything()));
}

#[test]
fn test_embedding_json_is_a_plain_array() {
    let embedding = FaceEmbedding::new(vec![0.5, -1.25, 3.0]);
    let json = embedding.to_json().unwrap();
    assert_eq!(json, "[0.5,-1.25,3.0]");
    assert_eq!(FaceEmbedding::from_json(&json).unwrap(), embedding);
}

#[test]
fn test_embedding_from_malformed_json_fails() {
    assert!(FaceEmbedding::from_json("{\"not\":\"a list\"}").is_err());
}
