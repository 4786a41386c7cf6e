//! Cookie-session authentication middleware.
//!
//! A logged-in browser carries signed session claims (JWT) in an HTTP-only
//! cookie. Handlers opt into authentication with the `SessionUser` extractor;
//! anonymous requests to such handlers are redirected to the login page with
//! the original URL preserved in a `next` query parameter.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session claims carried in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Username.
    pub username: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// Session ID (unique identifier).
    pub jti: String,
}

/// Application state for session verification.
#[derive(Clone)]
pub struct SessionState {
    /// Decoding key for session token verification.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl SessionState {
    /// Create a new session state from a secret key.
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }
}

/// Redirect response sent to anonymous callers of protected pages.
///
/// Points at the login page with the original URL in the `next` parameter.
#[derive(Debug)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    fn from_parts(parts: &Parts) -> Self {
        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        Self { next }
    }

    /// The login URL this redirect points at.
    pub fn location(&self) -> String {
        format!("/login?next={}", urlencoding::encode(&self.next))
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

/// Read and verify session claims from the request cookies.
fn claims_from_parts(parts: &Parts) -> Option<SessionClaims> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let session_state = parts.extensions.get::<Arc<SessionState>>()?;

    match decode::<SessionClaims>(
        &token,
        &session_state.decoding_key,
        &session_state.validation,
    ) {
        Ok(token_data) => Some(token_data.claims),
        Err(e) => {
            tracing::debug!("Session token validation failed: {}", e);
            None
        }
    }
}

/// Extractor for authenticated users.
///
/// Use this extractor to require a session for a handler. Anonymous requests
/// are rejected with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from_parts(parts)
            .map(SessionUser)
            .ok_or_else(|| LoginRedirect::from_parts(parts))
    }
}

/// Optional session extractor.
///
/// Similar to SessionUser but doesn't redirect anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalSessionUser(pub Option<SessionClaims>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSessionUser(claims_from_parts(parts)))
    }
}

/// Middleware function to inject session state into request extensions.
pub async fn session_layer(
    session_state: Arc<SessionState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(session_state);
    next.run(request).await
}
