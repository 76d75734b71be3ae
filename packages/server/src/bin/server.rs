//! Donor API server
//!
//! Loads configuration, runs migrations, starts the expired-OTP sweep and
//! serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use donor_core::domains::auth::{JwtService, OtpSettings};
use donor_core::kernel::{start_scheduler, ServerDeps, TwilioAdapter};
use donor_core::server::middleware::OtpRateLimit;
use donor_core::server::{build_app, HttpSettings};
use donor_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,donor_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting donor server");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Log masked env vars for production troubleshooting
    fn mask_env(name: &str) {
        match std::env::var(name) {
            Ok(val) if val.is_empty() => tracing::info!("  {}: (empty)", name),
            Ok(val) => {
                let show = val.chars().take(4).collect::<String>();
                let hidden = val.chars().count().saturating_sub(4);
                tracing::info!("  {}: {}{}  ({} chars)", name, show, "*".repeat(hidden), val.chars().count());
            }
            Err(_) => tracing::warn!("  {}: NOT SET", name),
        }
    }
    tracing::info!("Environment variables:");
    for name in &[
        "DATABASE_URL", "JWT_SECRET", "JWT_ISSUER", "TWILIO_ACCOUNT_SID",
        "TWILIO_AUTH_TOKEN", "TWILIO_PHONE_NUMBER", "PORT", "ALLOWED_ORIGINS",
    ] {
        mask_env(name);
    }

    let config = Config::from_env()?;

    // Database setup
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations applied");

    // Create Twilio service
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        from_number: config.twilio_phone_number.clone(),
    }));

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let server_deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(TwilioAdapter::new(twilio)),
        jwt_service,
        OtpSettings {
            country_code: config.sms_country_code.clone(),
            organization_name: config.organization_name.clone(),
            ..OtpSettings::default()
        },
    ));

    // Keep the scheduler alive for the lifetime of the server
    let _scheduler = start_scheduler(server_deps.otp.clone())
        .await
        .context("Failed to start scheduled tasks")?;

    let app = build_app(
        server_deps,
        HttpSettings {
            allowed_origins: config.allowed_origins.clone(),
            otp_rate_limit: OtpRateLimit {
                burst: config.otp_rate_limit_burst,
                period: config.otp_rate_limit_period,
            },
        },
    )?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
