//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! Expired OTP challenges are removed lazily when someone tries to verify
//! them. Numbers that never come back would otherwise sit in memory until
//! overwritten, so a sweep runs every minute.

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::auth::OtpService;

/// Start all scheduled tasks
pub async fn start_scheduler(otp: Arc<OtpService>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Expired challenge sweep - runs at the top of every minute
    let sweep_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let otp = otp.clone();
        Box::pin(async move {
            run_challenge_sweep(&otp).await;
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (expired OTP sweep every minute)");
    Ok(scheduler)
}

/// Remove expired challenges from the in-memory store
pub async fn run_challenge_sweep(otp: &OtpService) -> usize {
    let removed = otp.purge_expired().await;
    if removed > 0 {
        tracing::info!(removed, "Purged expired OTP challenges");
    } else {
        tracing::debug!("No expired OTP challenges");
    }
    removed
}
