//! OTP challenge engine.
//!
//! Generates one-time codes, stores them as pending challenges, hands them to
//! the SMS gateway and verifies them. A challenge is single-use and lives for
//! five minutes.

use anyhow::anyhow;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::models::{ChallengeOutcome, ChallengeStore, PendingChallenge};
use super::AuthError;
use crate::common::{mask_phone, PhoneNumber};
use crate::kernel::BaseSmsService;

/// Upper bound on a single gateway call.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OtpSettings {
    /// Prefix turning a 10-digit number into E.164 (e.g. "+91")
    pub country_code: String,
    /// Named in the SMS body
    pub organization_name: String,
    pub delivery_timeout: Duration,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            country_code: "+91".to_string(),
            organization_name: "Swagatham Foundation".to_string(),
            delivery_timeout: DELIVERY_TIMEOUT,
        }
    }
}

/// A successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub phone_number: String,
}

pub struct OtpService {
    store: ChallengeStore,
    sms: Arc<dyn BaseSmsService>,
    settings: OtpSettings,
}

impl OtpService {
    pub fn new(sms: Arc<dyn BaseSmsService>, settings: OtpSettings) -> Self {
        Self {
            store: ChallengeStore::new(),
            sms,
            settings,
        }
    }

    pub fn store(&self) -> &ChallengeStore {
        &self.store
    }

    pub fn settings(&self) -> &OtpSettings {
        &self.settings
    }

    /// Issue a fresh challenge for `phone_number` and deliver it by SMS.
    ///
    /// Validation happens before anything is stored. On delivery failure the
    /// stored challenge is kept; the client recovers by requesting again.
    pub async fn request_challenge(&self, phone_number: &str) -> Result<(), AuthError> {
        let phone = PhoneNumber::parse(phone_number).ok_or(AuthError::InvalidPhoneNumber)?;

        let code = generate_code();
        let challenge = PendingChallenge::new(phone.as_str().to_string(), code.clone(), Utc::now());
        if self.store.insert(challenge).await.is_some() {
            debug!(phone = %phone.masked(), "Replaced pending OTP challenge");
        }

        let body = format!(
            "Your OTP for {} is: {}",
            self.settings.organization_name, code
        );
        let recipient = phone.to_e164(&self.settings.country_code);

        match tokio::time::timeout(
            self.settings.delivery_timeout,
            self.sms.send_sms(&recipient, &body),
        )
        .await
        {
            Ok(Ok(())) => {
                info!(phone = %phone.masked(), "OTP sent");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(phone = %phone.masked(), error = %e, "OTP delivery failed");
                Err(AuthError::DeliveryFailed(e))
            }
            Err(_) => {
                warn!(phone = %phone.masked(), "OTP delivery timed out");
                Err(AuthError::DeliveryFailed(anyhow!(
                    "SMS gateway did not respond within {:?}",
                    self.settings.delivery_timeout
                )))
            }
        }
    }

    /// Check a submitted code. A correct code consumes the challenge.
    pub async fn verify_challenge(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<Verified, AuthError> {
        if phone_number.is_empty() || code.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let masked = mask_phone(phone_number);
        match self.store.consume(phone_number, code, Utc::now()).await {
            ChallengeOutcome::Verified => {
                info!(phone = %masked, "OTP verified");
                Ok(Verified {
                    phone_number: phone_number.to_string(),
                })
            }
            ChallengeOutcome::NotFound => {
                debug!(phone = %masked, "No pending OTP");
                Err(AuthError::ChallengeNotFound)
            }
            ChallengeOutcome::Expired => {
                info!(phone = %masked, "OTP expired");
                Err(AuthError::ChallengeExpired)
            }
            ChallengeOutcome::Mismatch => {
                info!(phone = %masked, "Incorrect OTP submitted");
                Err(AuthError::InvalidCode)
            }
        }
    }

    /// Remove expired challenges. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        self.store.purge_expired(Utc::now()).await
    }
}

/// Uniformly random 6-digit code from the OS CSPRNG, zero-padded.
pub fn generate_code() -> String {
    let value: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:06}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockSmsService;
    use chrono::Duration as ChronoDuration;

    fn service(sms: Arc<MockSmsService>) -> OtpService {
        OtpService::new(sms, OtpSettings::default())
    }

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_request_stores_and_delivers() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms.clone());

        otp.request_challenge("9876543210").await.unwrap();

        let sent = sms.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+919876543210");
        assert!(sent[0]
            .body
            .starts_with("Your OTP for Swagatham Foundation is: "));

        let code = sms.last_code_for("+919876543210").unwrap();
        let stored = otp.store().get("9876543210").await.unwrap();
        assert_eq!(stored.code, code);
    }

    #[tokio::test]
    async fn test_request_overwrites_previous_challenge() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms.clone());

        otp.request_challenge("9876543210").await.unwrap();
        otp.request_challenge("9876543210").await.unwrap();

        assert_eq!(otp.store().len().await, 1);
        let latest = sms.last_code_for("+919876543210").unwrap();
        assert_eq!(otp.store().get("9876543210").await.unwrap().code, latest);
    }

    #[tokio::test]
    async fn test_invalid_phone_mutates_nothing() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms.clone());

        for raw in ["", "12345", "98765432101", "98765o3210", "+919876543"] {
            let err = otp.request_challenge(raw).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidPhoneNumber), "{raw:?}");
        }

        assert!(otp.store().is_empty().await);
        assert!(sms.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_challenge() {
        let sms = Arc::new(MockSmsService::failing());
        let otp = service(sms.clone());

        let err = otp.request_challenge("9876543210").await.unwrap_err();
        assert!(matches!(err, AuthError::DeliveryFailed(_)));
        assert!(otp.store().get("9876543210").await.is_some());
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let sms = Arc::new(MockSmsService::slow(std::time::Duration::from_secs(5)));
        let otp = OtpService::new(
            sms.clone(),
            OtpSettings {
                delivery_timeout: std::time::Duration::from_millis(50),
                ..OtpSettings::default()
            },
        );

        let err = otp.request_challenge("9876543210").await.unwrap_err();
        assert!(matches!(err, AuthError::DeliveryFailed(_)));
        assert!(sms.sent_messages().is_empty());
        assert!(otp.store().get("9876543210").await.is_some());
    }

    #[tokio::test]
    async fn test_verify_once_then_not_found() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms.clone());

        otp.request_challenge("9876543210").await.unwrap();
        let code = sms.last_code_for("+919876543210").unwrap();

        let verified = otp.verify_challenge("9876543210", &code).await.unwrap();
        assert_eq!(verified.phone_number, "9876543210");

        let err = otp.verify_challenge("9876543210", &code).await.unwrap_err();
        assert!(matches!(err, AuthError::ChallengeNotFound));
    }

    #[tokio::test]
    async fn test_wrong_code_leaves_challenge_usable() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms.clone());

        otp.request_challenge("9876543210").await.unwrap();
        let code = sms.last_code_for("+919876543210").unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let err = otp.verify_challenge("9876543210", wrong).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode));

        assert!(otp.verify_challenge("9876543210", &code).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_expired_removes_entry() {
        let sms = Arc::new(MockSmsService::new());
        let otp = service(sms);

        let issued = Utc::now() - ChronoDuration::minutes(6);
        otp.store()
            .insert(PendingChallenge::new(
                "9876543210".to_string(),
                "123456".to_string(),
                issued,
            ))
            .await;

        let err = otp.verify_challenge("9876543210", "123456").await.unwrap_err();
        assert!(matches!(err, AuthError::ChallengeExpired));
        assert!(otp.store().get("9876543210").await.is_none());
    }

    #[tokio::test]
    async fn test_verify_requires_both_fields() {
        let otp = service(Arc::new(MockSmsService::new()));

        assert!(matches!(
            otp.verify_challenge("", "123456").await,
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            otp.verify_challenge("9876543210", "").await,
            Err(AuthError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn test_verify_without_request() {
        let otp = service(Arc::new(MockSmsService::new()));
        assert!(matches!(
            otp.verify_challenge("9876543210", "123456").await,
            Err(AuthError::ChallengeNotFound)
        ));
    }
}
