use crate::{CardType, IdType};

use std::str::FromStr;

#[test]
fn test_card_type_as_str_matches_prompt_labels() {
    assert_eq!(CardType::Aadhaar.as_str(), "Aadhaar card");
    assert_eq!(CardType::VoterId.as_str(), "Voter ID");
    assert_eq!(CardType::Pan.as_str(), "PAN card");
    assert_eq!(CardType::DrivingLicense.as_str(), "Driving License");
}

#[test]
fn test_card_type_from_str_ignores_case_and_padding() {
    assert_eq!(
        CardType::from_str("  aadhaar CARD ").unwrap(),
        CardType::Aadhaar
    );
    assert_eq!(CardType::from_str("VOTER ID").unwrap(), CardType::VoterId);
    assert!(CardType::from_str("Passport").is_err());
    assert!(CardType::from_str("").is_err());
}

#[test]
fn test_card_type_maps_to_conflict_column() {
    assert_eq!(CardType::Aadhaar.id_type(), IdType::Aadhaar);
    assert_eq!(CardType::VoterId.id_type(), IdType::VoterId);
    assert_eq!(CardType::Pan.id_type(), IdType::Pan);
    assert_eq!(CardType::DrivingLicense.id_type(), IdType::License);
}

#[test]
fn test_card_type_serde_uses_labels() {
    let json = serde_json::to_string(&CardType::DrivingLicense).unwrap();
    assert_eq!(json, "\"Driving License\"");

    let parsed: CardType = serde_json::from_str("\"PAN card\"").unwrap();
    assert_eq!(parsed, CardType::Pan);
}
