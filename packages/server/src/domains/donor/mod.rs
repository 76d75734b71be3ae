//! Donor profiles, family members, donations and KYC details.

pub mod actions;
pub mod errors;
pub mod models;
pub mod types;

pub use errors::DonorError;
pub use types::*;
