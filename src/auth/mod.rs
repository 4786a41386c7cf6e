//! Authentication module for Palaver.
//!
//! Provides password hashing and credential verification. Session handling
//! lives in the web layer (`web::middleware`).

mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};

use crate::db::{User, UserRepository};
use crate::{Database, PalaverError, Result};

/// Verify a username/password pair against the database.
///
/// Returns the user on success. Fails with an `Auth` error for unknown
/// usernames, wrong passwords, and disabled accounts; the message is the
/// same in all three cases so a caller cannot probe for valid usernames.
pub async fn authenticate(db: &Database, username: &str, password: &str) -> Result<User> {
    const BAD_CREDENTIALS: &str = "invalid username or password";

    let repo = UserRepository::new(db.pool());
    let user = repo
        .get_by_username(username)
        .await?
        .ok_or_else(|| PalaverError::Auth(BAD_CREDENTIALS.to_string()))?;

    verify_password(password, &user.password)
        .map_err(|_| PalaverError::Auth(BAD_CREDENTIALS.to_string()))?;

    if !user.is_active {
        return Err(PalaverError::Auth(BAD_CREDENTIALS.to_string()));
    }

    repo.update_last_login(user.id).await?;

    Ok(user)
}
