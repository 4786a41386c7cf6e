//! Middleware for the Palaver web front end.

mod session;

pub use session::{
    session_layer, LoginRedirect, OptionalSessionUser, SessionClaims, SessionState, SessionUser,
    SESSION_COOKIE,
};
