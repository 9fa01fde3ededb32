pub mod error;
pub mod identities;
pub mod verification;
