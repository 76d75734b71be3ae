use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How long a delivered code stays usable.
pub const CHALLENGE_TTL_MINUTES: i64 = 5;

/// An outstanding OTP awaiting verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChallenge {
    pub phone_number: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingChallenge {
    pub fn new(phone_number: String, code: String, now: DateTime<Utc>) -> Self {
        Self {
            phone_number,
            code,
            expires_at: now + Duration::minutes(CHALLENGE_TTL_MINUTES),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Result of presenting a code against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// Code matched; the challenge has been removed.
    Verified,
    /// Nothing pending for this number.
    NotFound,
    /// Challenge had expired; it has been removed.
    Expired,
    /// Wrong code; the challenge is left in place.
    Mismatch,
}

/// In-memory challenge store, one entry per phone number.
///
/// Process-wide and ephemeral: nothing survives a restart. Expired entries are
/// removed lazily on verification and by `purge_expired`.
#[derive(Clone, Default)]
pub struct ChallengeStore {
    challenges: Arc<RwLock<HashMap<String, PendingChallenge>>>,
}

impl ChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a challenge, replacing any pending one for the same number.
    pub async fn insert(&self, challenge: PendingChallenge) -> Option<PendingChallenge> {
        let mut challenges = self.challenges.write().await;
        challenges.insert(challenge.phone_number.clone(), challenge)
    }

    pub async fn get(&self, phone_number: &str) -> Option<PendingChallenge> {
        let challenges = self.challenges.read().await;
        challenges.get(phone_number).cloned()
    }

    /// Check `code` and consume the challenge under a single write lock, so two
    /// concurrent verifications can never both succeed.
    pub async fn consume(
        &self,
        phone_number: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> ChallengeOutcome {
        let mut challenges = self.challenges.write().await;

        let Some(challenge) = challenges.get(phone_number) else {
            return ChallengeOutcome::NotFound;
        };

        if challenge.is_expired_at(now) {
            challenges.remove(phone_number);
            return ChallengeOutcome::Expired;
        }

        if challenge.code != code {
            return ChallengeOutcome::Mismatch;
        }

        challenges.remove(phone_number);
        ChallengeOutcome::Verified
    }

    /// Drop every expired challenge. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut challenges = self.challenges.write().await;
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        before - challenges.len()
    }

    pub async fn len(&self) -> usize {
        self.challenges.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.challenges.read().await.is_empty()
    }
}
