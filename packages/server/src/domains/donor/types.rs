//! Request and response shapes for the donor endpoints.
//!
//! Requests deserialize with every field optional so that a missing field is
//! reported with the same message as an empty one. `validate()` turns a
//! request into the model input types, or the first validation failure.

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::DonorError;
use super::models::{
    Donation, FamilyMember, KycDocument, KycSubmission, NewDonation, NewFamilyMember,
    ProfileUpdate, User,
};

lazy_static! {
    static ref PAN_REGEX: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
    static ref AADHAAR_REGEX: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
}

/// Donations must stay below this (`NUMERIC(12,2)` holds ten integer digits)
fn donation_ceiling() -> Decimal {
    Decimal::from(10_000_000_000i64)
}

pub const MAX_PAYMENT_ID_LEN: usize = 255;

/// Trimmed, non-empty value or `None`
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(raw: &str) -> Result<NaiveDate, DonorError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DonorError::invalid("Invalid date of birth"))
}

// =============================================================================
// Profile update
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberInput {
    pub name: Option<String>,
    pub relation: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub family_members: Option<Vec<FamilyMemberInput>>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(ProfileUpdate, Vec<NewFamilyMember>), DonorError> {
        let name = present(&self.name).ok_or_else(|| DonorError::missing("name"))?;
        let email = present(&self.email).ok_or_else(|| DonorError::missing("email"))?;
        let dob = present(&self.dob).ok_or_else(|| DonorError::missing("dob"))?;
        let gender = present(&self.gender).ok_or_else(|| DonorError::missing("gender"))?;
        let address = present(&self.address).ok_or_else(|| DonorError::missing("address"))?;
        let members = self
            .family_members
            .as_ref()
            .ok_or_else(|| DonorError::missing("familyMembers"))?;

        if members.is_empty() {
            return Err(DonorError::invalid(
                "At least one family member is required",
            ));
        }

        let dob = parse_date(&dob)?;

        let family = members
            .iter()
            .map(|m| {
                let (Some(name), Some(relation)) = (present(&m.name), present(&m.relation)) else {
                    return Err(DonorError::invalid(
                        "Each family member requires a name and relation",
                    ));
                };
                let dob = present(&m.dob).map(|d| parse_date(&d)).transpose()?;
                Ok(NewFamilyMember {
                    name,
                    relation,
                    gender: present(&m.gender),
                    dob,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            ProfileUpdate {
                name,
                email,
                dob,
                gender,
                address,
            },
            family,
        ))
    }
}

// =============================================================================
// Donation
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    pub amount: Option<Decimal>,
    pub payment_id: Option<String>,
    pub donation_type: Option<String>,
    pub tax_exemption: Option<bool>,
}

impl DonateRequest {
    pub fn validate(&self) -> Result<NewDonation, DonorError> {
        let amount = self.amount.ok_or_else(|| DonorError::missing("amount"))?;
        let payment_id = present(&self.payment_id).ok_or_else(|| DonorError::missing("paymentId"))?;
        let donation_type =
            present(&self.donation_type).ok_or_else(|| DonorError::missing("donationType"))?;
        let tax_exemption = self
            .tax_exemption
            .ok_or_else(|| DonorError::missing("taxExemption"))?;

        let amount = amount.normalize();
        if amount <= Decimal::ZERO || amount.scale() > 2 || amount >= donation_ceiling() {
            return Err(DonorError::invalid("Invalid donation amount"));
        }
        if payment_id.chars().count() > MAX_PAYMENT_ID_LEN {
            return Err(DonorError::invalid("Invalid payment ID"));
        }

        Ok(NewDonation {
            amount,
            payment_id,
            donation_type,
            tax_exemption,
        })
    }
}

// =============================================================================
// KYC
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRequest {
    pub pan_number: Option<String>,
    pub aadhaar_number: Option<String>,
    pub dob: Option<String>,
    pub kyc_doc_path: Option<String>,
}

impl KycRequest {
    pub fn validate(&self) -> Result<KycSubmission, DonorError> {
        let (Some(pan), Some(aadhaar), Some(dob)) = (
            present(&self.pan_number),
            present(&self.aadhaar_number),
            present(&self.dob),
        ) else {
            return Err(DonorError::invalid(
                "PAN, Aadhaar numbers and Date of Birth are required",
            ));
        };

        let pan = pan.to_ascii_uppercase();
        if !PAN_REGEX.is_match(&pan) {
            return Err(DonorError::invalid("Invalid PAN number format"));
        }
        let aadhaar: String = aadhaar.chars().filter(|c| !c.is_whitespace()).collect();
        if !AADHAAR_REGEX.is_match(&aadhaar) {
            return Err(DonorError::invalid("Invalid Aadhaar number format"));
        }

        Ok(KycSubmission {
            pan_number: pan,
            aadhaar_number: aadhaar,
            date_of_birth: parse_date(&dob)?,
            kyc_doc_path: present(&self.kyc_doc_path),
        })
    }
}

// =============================================================================
// Profile view
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberView {
    pub name: String,
    pub relation: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl From<FamilyMember> for FamilyMemberView {
    fn from(m: FamilyMember) -> Self {
        Self {
            name: m.name,
            relation: m.relation,
            gender: m.gender,
            dob: m.dob,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub amount: Decimal,
    pub payment_id: String,
    #[serde(rename = "type")]
    pub donation_type: String,
    pub currency: String,
    pub tax_exemption: bool,
    pub date: DateTime<Utc>,
}

impl From<Donation> for DonationView {
    fn from(d: Donation) -> Self {
        Self {
            amount: d.amount,
            payment_id: d.payment_id,
            donation_type: d.donation_type,
            currency: d.currency,
            tax_exemption: d.tax_exemption,
            date: d.donation_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycView {
    pub pan_number: String,
    /// Last four digits only
    pub aadhaar_number: String,
    pub kyc_doc_path: Option<String>,
}

impl From<KycDocument> for KycView {
    fn from(k: KycDocument) -> Self {
        Self {
            aadhaar_number: k.masked_aadhaar(),
            pan_number: k.pan_number,
            kyc_doc_path: k.kyc_doc_path,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub family_members: Vec<FamilyMemberView>,
    pub donations: Vec<DonationView>,
    pub kyc_documents: Option<KycView>,
    pub profile_complete: bool,
}

impl ProfileView {
    pub fn assemble(
        user: User,
        family: Vec<FamilyMember>,
        donations: Vec<Donation>,
        kyc: Option<KycDocument>,
    ) -> Self {
        Self {
            name: user.name,
            email: user.email,
            phone: user.phone,
            dob: user.dob,
            gender: user.gender,
            address: user.address,
            family_members: family.into_iter().map(Into::into).collect(),
            donations: donations.into_iter().map(Into::into).collect(),
            kyc_documents: kyc.map(Into::into),
            profile_complete: user.profile_complete,
        }
    }
}
