//! One-way password value type.
//!
//! A [`Password`] is built from plaintext and keeps only the Argon2id PHC
//! string. The plaintext buffer is wiped as soon as the hash exists, and the
//! type never serialises or prints its contents.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Plaintext was empty.
    #[error("password must not be empty")]
    Empty,
    /// The hasher rejected the input or parameters.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

/// Hashed user password.
///
/// # Examples
/// ```
/// use grace::domain::Password;
///
/// let password = Password::from_plaintext("correct horse").expect("hashes");
/// assert!(password.verify("correct horse"));
/// assert!(!password.verify("battery staple"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl Password {
    /// Hash `plaintext` with Argon2id and a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Empty`] for empty input and
    /// [`PasswordError::Hash`] when the hasher fails.
    pub fn from_plaintext(plaintext: impl Into<String>) -> Result<Self, PasswordError> {
        let plaintext = Zeroizing::new(plaintext.into());
        if plaintext.is_empty() {
            return Err(PasswordError::Empty);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash {
                message: err.to_string(),
            })?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a PHC string loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Stored PHC string.
    #[must_use]
    pub fn hash(&self) -> &str {
        self.hash.as_str()
    }

    /// Whether a hash has been set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.hash.is_empty()
    }

    /// Check `candidate` against the stored hash.
    ///
    /// Unparseable or empty hashes never verify.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
