use crate::IdType;

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn test_id_type_columns() {
    assert_eq!(IdType::Aadhaar.column(), "aadhaar_no");
    assert_eq!(IdType::Pan.column(), "pan_no");
    assert_eq!(IdType::License.column(), "license_no");
    assert_eq!(IdType::VoterId.column(), "voter_id_number");
}

#[test]
fn test_id_type_from_str_accepts_column_and_short_names() {
    assert_eq!(IdType::from_str("aadhaar_no").unwrap(), IdType::Aadhaar);
    assert_eq!(IdType::from_str("PAN").unwrap(), IdType::Pan);
    assert_eq!(IdType::from_str("license").unwrap(), IdType::License);
    assert_eq!(
        IdType::from_str("voter_id_number").unwrap(),
        IdType::VoterId
    );
    assert!(IdType::from_str("name").is_err());
}

#[googletest::test]
fn given_spaced_aadhaar_when_normalized_then_whitespace_removed() {
    expect_that!(
        IdType::Aadhaar.normalize("7514 9018\t5308"),
        some(eq("751490185308"))
    );
}

#[googletest::test]
fn given_lowercase_ids_when_normalized_then_uppercased_except_aadhaar() {
    expect_that!(IdType::Pan.normalize("abcde 1234f"), some(eq("ABCDE1234F")));
    expect_that!(
        IdType::License.normalize("mh12 2011 0012345"),
        some(eq("MH1220110012345"))
    );
    expect_that!(IdType::VoterId.normalize(" xyz1234567 "), some(eq("XYZ1234567")));
}

#[googletest::test]
fn given_blank_value_when_normalized_then_none() {
    expect_that!(IdType::VoterId.normalize("   "), none());
}
