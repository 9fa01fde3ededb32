pub mod identities;
pub mod identity_dto;
pub mod identity_response;
