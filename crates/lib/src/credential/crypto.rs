//! Password hashing for the credential service.
//!
//! Uses Argon2id in PHC string format; the salt is generated here and
//! embedded in the hash string, so nothing besides the hash needs storing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::CredentialError;
use crate::Result;

/// Hash a password using Argon2id
///
/// # Arguments
/// * `password` - The password to hash
///
/// # Returns
/// The Argon2 hash string (PHC format, salt embedded)
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| CredentialError::HashingFailed {
            reason: format!("Password hashing failed: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// Both an unparsable stored hash and a mismatch produce
/// `InvalidCredentials`, so callers cannot distinguish the two.
///
/// # Arguments
/// * `password` - The password to verify
/// * `password_hash` - The stored password hash (PHC format)
///
/// # Returns
/// Ok(()) if password is correct, Err otherwise
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<()> {
    let parsed_hash = PasswordHash::new(password_hash.as_ref())
        .map_err(|_| CredentialError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .map_err(|_| CredentialError::InvalidCredentials.into())
}
