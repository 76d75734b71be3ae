//! Application setup and router construction.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::{jwt_auth_middleware, rate_limit_envelope, OtpRateLimit};
use crate::server::routes::{
    donate_handler, get_profile_handler, health_handler, send_otp_handler, submit_kyc_handler,
    update_profile_handler, verify_otp_handler,
};

/// HTTP-level settings that are not part of `ServerDeps`
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub otp_rate_limit: OtpRateLimit,
}

/// Build the Axum application router
///
/// Public: send-otp (rate limited per IP), verify-otp, health.
/// Protected (JWT): profile read/update, donate, KYC.
pub fn build_app(deps: Arc<ServerDeps>, settings: HttpSettings) -> Result<Router> {
    // Clone jwt_service for middleware closure
    let jwt_service = deps.jwt_service.clone();

    let protected = Router::new()
        .route(
            "/api/user/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route("/api/donate", post(donate_handler))
        .route("/api/kyc", post(submit_kyc_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }));

    // Per-IP token bucket on OTP sends. SmartIpKeyExtractor reads the client IP
    // from X-Forwarded-For / X-Real-IP / Forwarded, falling back to the peer
    // address. use_headers() adds the x-ratelimit-* response headers.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .period(settings.otp_rate_limit.period)
            .burst_size(settings.otp_rate_limit.burst)
            .use_headers()
            .finish()
            .context("OTP rate limit needs a non-zero burst and period")?,
    );

    let send_otp = Router::new()
        .route("/api/send-otp", post(send_otp_handler))
        .layer(GovernorLayer {
            config: rate_limit_config,
        })
        .layer(middleware::from_fn(rate_limit_envelope));

    let app = Router::new()
        .route("/api/verify-otp", post(verify_otp_handler))
        .route("/health", get(health_handler))
        .merge(send_otp)
        .merge(protected)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(deps))
        .layer(cors_layer(&settings.allowed_origins)?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}
