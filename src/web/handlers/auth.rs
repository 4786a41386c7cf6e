//! Authentication handlers and shared application state.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use std::sync::Arc;

use crate::web::error::PageError;
use crate::web::middleware::{SessionClaims, SESSION_COOKIE};
use crate::web::pages;
use crate::{auth, Database, PalaverError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool inside is cheap to clone).
    pub db: Database,
    /// Forum name, shown in page titles.
    pub forum_name: String,
    /// Forum description, shown on the home page.
    pub forum_description: String,
    /// Session token encoding key.
    pub encoding_key: EncodingKey,
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, session_secret: &str, session_ttl_secs: u64) -> Self {
        Self {
            db,
            forum_name: "Palaver".to_string(),
            forum_description: "A small discussion board".to_string(),
            encoding_key: EncodingKey::from_secret(session_secret.as_bytes()),
            session_ttl_secs,
        }
    }

    /// Set the forum name and description.
    pub fn with_forum_info(mut self, name: &str, description: &str) -> Self {
        self.forum_name = name.to_string();
        self.forum_description = description.to_string();
        self
    }

    /// Generate a session token for a user.
    pub fn generate_session_token(
        &self,
        user_id: i64,
        username: &str,
    ) -> Result<String, PageError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = SessionClaims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.session_ttl_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {}", e);
            PageError::Internal
        })
    }
}

/// Restrict a post-login redirect target to local paths.
fn safe_next(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/"
    }
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Where to go after a successful login.
    #[serde(default)]
    pub next: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login.
    #[serde(default)]
    pub next: String,
}

/// GET /login - Show the login form.
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
) -> Html<String> {
    let next = safe_next(&query.next);
    Html(pages::login_page(&state.forum_name, next, "", None))
}

/// POST /login - Verify credentials and start a session.
///
/// On success sets the session cookie and redirects to `next`; on bad
/// credentials re-renders the form with an error message.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let next = safe_next(&form.next).to_string();

    match auth::authenticate(&state.db, &form.username, &form.password).await {
        Ok(user) => {
            let token = state.generate_session_token(user.id, &user.username)?;
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);

            tracing::info!(username = %user.username, "User logged in");
            Ok((jar.add(cookie), Redirect::to(&next)).into_response())
        }
        Err(PalaverError::Auth(message)) => Ok(Html(pages::login_page(
            &state.forum_name,
            &next,
            &form.username,
            Some(&message),
        ))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /logout - End the session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let removal = Cookie::build(SESSION_COOKIE).path("/");
    (jar.remove(removal), Redirect::to("/"))
}
