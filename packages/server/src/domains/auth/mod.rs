//! Auth domain - handles authentication via OTP (phone number)
//!
//! Flow:
//!   send-otp → OtpService stores a challenge and texts the code
//!   verify-otp → challenge consumed → user upserted → JWT issued
//!   protected routes → jwt_auth middleware → AuthUser(phone)

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod otp;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
pub use models::{ChallengeOutcome, ChallengeStore, PendingChallenge};
pub use otp::{generate_code, OtpService, OtpSettings, Verified};
