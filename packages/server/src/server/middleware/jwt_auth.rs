use crate::common::{mask_phone, ApiError};
use crate::domains::auth::{AuthError, JwtService};
use axum::{
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller, taken from a verified session token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub phone_number: String,
}

/// JWT authentication middleware for protected routes
///
/// Rejects the request with 401 unless the Authorization header carries a
/// valid token. On success the `AuthUser` is added to request extensions and
/// is the only identity handlers see.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &jwt_service) {
        Ok(user) => {
            debug!(phone = %mask_phone(&user.phone_number), "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!(reason = %e, "Rejected unauthenticated request");
            ApiError::from(e).into_response()
        }
    }
}

/// Extract and verify the token from request headers
///
/// The raw header value is the token; a `Bearer ` prefix is tolerated.
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AuthError::MissingToken);
    };
    let raw = value.to_str().map_err(|_| AuthError::InvalidToken)?.trim();

    // "Bearer" with nothing after it is an absent credential
    let token = match raw.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => raw,
    };
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let phone_number = jwt_service.validate(token)?;
    Ok(AuthUser { phone_number })
}
