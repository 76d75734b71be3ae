pub mod audit_log;
pub mod donation;
pub mod family_member;
pub mod kyc_document;
pub mod user;

pub use audit_log::AuditLog;
pub use donation::{Donation, NewDonation, DEFAULT_CURRENCY};
pub use family_member::{FamilyMember, NewFamilyMember};
pub use kyc_document::{KycDocument, KycSubmission};
pub use user::{ProfileUpdate, User, VerifiedLogin};
