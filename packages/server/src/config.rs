use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub sms_country_code: String,
    pub organization_name: String,
    pub allowed_origins: Vec<String>,
    pub otp_rate_limit_burst: u32,
    pub otp_rate_limit_period: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "donor-server".to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER")
                .context("TWILIO_PHONE_NUMBER must be set")?,
            sms_country_code: env::var("SMS_COUNTRY_CODE").unwrap_or_else(|_| "+91".to_string()),
            organization_name: env::var("ORGANIZATION_NAME")
                .unwrap_or_else(|_| "Swagatham Foundation".to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            otp_rate_limit_burst: env::var("OTP_RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("OTP_RATE_LIMIT_BURST must be a valid number")?,
            otp_rate_limit_period: Duration::from_secs(
                env::var("OTP_RATE_LIMIT_PERIOD_SECS")
                    .unwrap_or_else(|_| "180".to_string())
                    .parse()
                    .context("OTP_RATE_LIMIT_PERIOD_SECS must be a valid number")?,
            ),
        })
    }
}

/// Comma-separated origins, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
