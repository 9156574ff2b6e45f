use std::sync::LazyLock;

use anyhow::{Context as _, anyhow};
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::Argon2;

use crate::domain::repository::PasswordHasherPort;
use crate::error::GradebookServiceError;

/// Hash checked when a login names no account, so both paths do the same work.
static ABSENT_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("gradebook-absent-account").ok());

/// Argon2id with default parameters, stored as a PHC string.
///
/// Hashing runs on the blocking pool to keep request workers free.
#[derive(Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasherPort for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, GradebookServiceError> {
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("password hashing task")??;
        Ok(hash)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, GradebookServiceError> {
        let (password, hash) = (password.to_owned(), hash.to_owned());
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("password verify task")?
    }

    async fn verify_absent(&self, password: &str) -> Result<bool, GradebookServiceError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            if let Some(hash) = ABSENT_ACCOUNT_HASH.as_deref() {
                let _ = verify_password(&password, hash);
            }
        })
        .await
        .context("password verify task")?;
        Ok(false)
    }
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool, GradebookServiceError> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("parse password hash: {e}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("verify password: {e}").into()),
    }
}
