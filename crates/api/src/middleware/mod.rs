//! Request extractors that gate the admin API.
//!
//! - [`auth::AuthOperator`] -- the signed-in operator, from a Bearer token or
//!   the session cookie.

pub mod auth;
