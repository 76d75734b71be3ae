// Donor management backend - API Core
//
// Phone OTP login with JWT sessions, donor profiles, donations and KYC details.
// Business logic lives in domains/*/actions; server/ is the HTTP surface.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
