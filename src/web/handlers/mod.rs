//! Page handlers for the Palaver web front end.

pub mod auth;
pub mod board;
pub mod topic;

pub use auth::*;
pub use board::*;
pub use topic::*;
