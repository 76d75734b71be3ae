use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::AuthError;

/// Session lifetime from issuance.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,          // Subject (phone number)
    pub phone_number: String, // Authenticated identity handed to handlers
    pub exp: i64,             // Expiration timestamp
    pub iat: i64,             // Issued at timestamp
    pub iss: String,          // Issuer
    pub jti: String,          // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies session tokens
///
/// Tokens are stateless: validity depends only on the HS256 signature, the
/// issuer, and `exp`. There is no server-side revocation.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a new token for a verified phone number, valid for 24 hours
    pub fn create_token(&self, phone_number: &str) -> Result<String, JwtError> {
        self.create_token_at(phone_number, Utc::now())
    }

    pub fn create_token_at(
        &self,
        phone_number: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = issued_at + chrono::Duration::hours(TOKEN_LIFETIME_HOURS);

        let claims = Claims {
            sub: phone_number.to_string(),
            phone_number: phone_number.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the signature, issuer and expiry all check out
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }

    /// Validate a presented token and return the phone number it was issued to.
    ///
    /// Every failure collapses into `AuthError::InvalidToken`; the reason is
    /// only logged.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        match self.verify_token(token) {
            Ok(claims) => Ok(claims.phone_number),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => debug!("Rejected expired token"),
                    ErrorKind::InvalidSignature => debug!("Rejected token with bad signature"),
                    kind => debug!(?kind, "Rejected malformed token"),
                }
                Err(AuthError::InvalidToken)
            }
        }
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
