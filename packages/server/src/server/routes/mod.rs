// HTTP routes
pub mod auth;
pub mod donations;
pub mod health;
pub mod kyc;
pub mod profile;

pub use auth::*;
pub use donations::*;
pub use health::*;
pub use kyc::*;
pub use profile::*;
