// Common types and utilities shared across the application

pub mod error;
pub mod extract;
pub mod phone;

pub use error::{ApiError, ErrorBody, MessageResponse};
pub use extract::ApiJson;
pub use phone::{mask_phone, PhoneNumber};
