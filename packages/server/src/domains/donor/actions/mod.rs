//! Donor domain actions - business logic called from the HTTP routes

pub mod get_profile;
pub mod record_donation;
pub mod submit_kyc;
pub mod update_profile;

pub use get_profile::get_profile;
pub use record_donation::record_donation;
pub use submit_kyc::submit_kyc;
pub use update_profile::update_profile;
