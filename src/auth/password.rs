use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Inputs longer than this are refused before reaching argon2.
pub const MAX_PASSWORD_BYTES: usize = 1024;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PasswordRejected {
    #[error("Password must not be empty")]
    Empty,
    #[error("Password must be at most {MAX_PASSWORD_BYTES} bytes")]
    TooLong,
}

/// Registration rules: non-empty and at most [`MAX_PASSWORD_BYTES`].
pub fn check_password(plain: &str) -> Result<(), PasswordRejected> {
    if plain.is_empty() {
        return Err(PasswordRejected::Empty);
    }
    if plain.len() > MAX_PASSWORD_BYTES {
        warn!(len = plain.len(), "password over length limit");
        return Err(PasswordRejected::TooLong);
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// `Ok(false)` on a wrong or over-long password; `Err` only if the stored
/// hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash unreadable");
        anyhow::anyhow!("parse password hash: {e}")
    })?;
    if plain.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
