//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by routes and
//! domain actions. External services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::{JwtService, OtpService, OtpSettings};
use crate::kernel::BaseSmsService;

// =============================================================================
// TwilioService Adapter (implements BaseSmsService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseSmsService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsService for TwilioAdapter {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        self.0
            .send_sms(to, body)
            .await
            .map(|message| {
                tracing::debug!(sid = %message.sid, status = %message.status, "SMS accepted");
            })
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// JWT service for token creation and validation
    pub jwt_service: Arc<JwtService>,
    /// OTP challenge engine; owns the process-wide challenge store
    pub otp: Arc<OtpService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        sms: Arc<dyn BaseSmsService>,
        jwt_service: Arc<JwtService>,
        otp_settings: OtpSettings,
    ) -> Self {
        let otp = Arc::new(OtpService::new(sms, otp_settings));
        Self {
            db_pool,
            jwt_service,
            otp,
        }
    }
}
