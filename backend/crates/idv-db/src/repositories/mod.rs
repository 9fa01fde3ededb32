pub mod identity_repository;
pub mod store_outcome;
