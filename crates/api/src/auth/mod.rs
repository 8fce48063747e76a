//! Operator authentication.
//!
//! - [`session`] -- session token issue/validation and the session cookie.
//!
//! Password checks live with the identity providers in `studio_store`.

pub mod session;
