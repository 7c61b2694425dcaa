use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use clinic_auth_types::token::issue_access_token;

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{User, validate_login, validate_registration};
use crate::error::ClinicServiceError;

/// Account plus a freshly signed access token.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub token: String,
}

fn sign(user: User, secret: &str, ttl_secs: u64) -> Result<AuthOutput, ClinicServiceError> {
    let (token, _exp) =
        issue_access_token(user.id, secret, ttl_secs).context("sign access token")?;
    Ok(AuthOutput { user, token })
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository, H: PasswordHasher> RegisterUseCase<U, H> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, ClinicServiceError> {
        validate_registration(&input.name, &input.email, &input.password)
            .map_err(ClinicServiceError::Validation)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ClinicServiceError::UserAlreadyExists);
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        // A concurrent registration can still win the race; the unique index reports it.
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        sign(user, &self.jwt_secret, self.token_ttl_secs)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository, H: PasswordHasher> LoginUseCase<U, H> {
    /// Unknown email and wrong password fail identically.
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, ClinicServiceError> {
        validate_login(&input.email, &input.password).map_err(ClinicServiceError::Validation)?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ClinicServiceError::InvalidCredentials)?;

        if !self.hasher.verify(&input.password, &user.password_hash).await? {
            return Err(ClinicServiceError::InvalidCredentials);
        }

        sign(user, &self.jwt_secret, self.token_ttl_secs)
    }
}
