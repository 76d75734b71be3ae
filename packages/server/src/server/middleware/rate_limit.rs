//! Per-IP rate limiting for OTP requests.
//!
//! The limiter itself is `tower_governor`; this module holds its settings and
//! rewrites its plain-text 429 into the JSON error envelope.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::warn;

use crate::common::ApiError;

pub const RATE_LIMIT_MESSAGE: &str = "Too many OTP requests from this IP, please try again later";

/// Token bucket: `burst` requests, one more every `period`
#[derive(Debug, Clone, Copy)]
pub struct OtpRateLimit {
    pub burst: u32,
    pub period: Duration,
}

impl Default for OtpRateLimit {
    fn default() -> Self {
        Self {
            burst: 5,
            period: Duration::from_secs(180),
        }
    }
}

/// Convert a limiter rejection into `{ success: false, error }`.
pub async fn rate_limit_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    warn!("OTP request rate limit exceeded");
    let retry_after = response.headers().get("retry-after").cloned();
    let mut limited = ApiError::TooManyRequests(RATE_LIMIT_MESSAGE.to_string()).into_response();
    if let Some(value) = retry_after {
        limited.headers_mut().insert("retry-after", value);
    }
    limited
}
