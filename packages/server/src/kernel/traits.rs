// Infrastructure traits
//
// External services sit behind these traits so domain code can be exercised
// with the mocks in `test_dependencies`.

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// SMS Service Trait (Infrastructure - OTP delivery)
// =============================================================================

#[async_trait]
pub trait BaseSmsService: Send + Sync {
    /// Deliver `body` as a text message to `to` (E.164 format)
    async fn send_sms(&self, to: &str, body: &str) -> Result<()>;
}
