// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::BaseSmsService;

// =============================================================================
// Mock SMS Service
// =============================================================================

/// A message captured by `MockSmsService`
#[derive(Debug, Clone)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

pub struct MockSmsService {
    sent: Arc<Mutex<Vec<SentSms>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
            delay: None,
        }
    }

    /// A gateway that rejects every message
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// A gateway that takes `delay` before answering
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Get all messages that were sent
    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The 6-digit code from the most recent message to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|sms| sms.to == to)
            .and_then(|sms| {
                let code = sms.body.rsplit(' ').next()?.to_string();
                (code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())).then_some(code)
            })
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsService for MockSmsService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            anyhow::bail!("Twilio returned an error");
        }

        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentSms {
                to: to.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
