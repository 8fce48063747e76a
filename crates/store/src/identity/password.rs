//! The local operator's password.
//!
//! `ADMIN_PASSWORD_HASH` holds an Argon2id PHC string. It is checked when
//! the server starts, so a mistyped hash stops startup instead of turning
//! every sign-in into an outage.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("not a PHC hash string: {0}")]
    Malformed(argon2::password_hash::Error),

    #[error("expected an argon2id hash, found {0}")]
    WrongAlgorithm(String),

    #[error("could not hash password: {0}")]
    Hashing(argon2::password_hash::Error),
}

/// A validated Argon2id hash of the operator password.
#[derive(Clone, PartialEq, Eq)]
pub struct OperatorPassword {
    phc: String,
}

impl OperatorPassword {
    /// Accept a stored hash after checking its algorithm and parameters.
    pub fn parse(phc: &str) -> Result<Self, PasswordError> {
        let phc = phc.trim();
        let parsed = PasswordHash::new(phc).map_err(PasswordError::Malformed)?;
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return Err(PasswordError::WrongAlgorithm(parsed.algorithm.to_string()));
        }
        Params::try_from(&parsed).map_err(PasswordError::Malformed)?;
        Ok(Self {
            phc: phc.to_string(),
        })
    }

    /// Hash `plaintext` with a fresh salt.
    pub fn hash(plaintext: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(PasswordError::Hashing)?;
        Ok(Self {
            phc: hash.to_string(),
        })
    }

    /// Whether `plaintext` is the operator password. Slow on purpose; run
    /// it off the async executor.
    pub fn matches(&self, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Prints the PHC string, ready for `ADMIN_PASSWORD_HASH`.
impl fmt::Display for OperatorPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phc)
    }
}

impl fmt::Debug for OperatorPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OperatorPassword(..)")
    }
}
