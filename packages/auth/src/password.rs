//! Password hashing and verification using Argon2id.
//!
//! Each hash carries its own random salt in PHC string form, so hashing the
//! same password twice gives two different strings that both verify.

use crate::error::{AuthError, AuthResult};
use argon2::{
    Argon2,
    password_hash::{
        Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::password_hash(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against a PHC string produced by [`hash_password`].
///
/// Returns `Ok(false)` for a wrong password and an error only when the
/// stored hash cannot be parsed.
pub fn verify_password(password: &str, phc: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| AuthError::password_hash(format!("Invalid stored hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(AuthError::password_hash(e.to_string())),
    }
}
