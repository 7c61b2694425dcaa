use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use crate::domain::repository::PasswordHasher;
use crate::error::ClinicServiceError;

/// Argon2id with default parameters and a fresh random salt per hash.
///
/// Hashing is CPU-bound, so both operations run on the blocking pool.
#[derive(Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, ClinicServiceError> {
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("join password hash task")?
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        Ok(hash)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ClinicServiceError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("join password verify task")?
            .map_err(|e| anyhow::anyhow!("verify password: {e}"))?;
        Ok(matches)
    }
}
