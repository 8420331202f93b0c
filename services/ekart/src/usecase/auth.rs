use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::token::issue_token;

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignupUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SignupUseCase<R> {
    pub async fn execute(&self, input: SignupInput) -> Result<(), ApiError> {
        if input.name.is_empty() || input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::MissingData);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }
        let password_hash =
            bcrypt::hash(&input.password, bcrypt::DEFAULT_COST).context("hash password")?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: String,
    pub name: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password both map to the same error so the
    /// response does not leak whether an account exists.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        let matches =
            bcrypt::verify(&input.password, &user.password_hash).context("verify password")?;
        if !matches {
            return Err(ApiError::InvalidCredentials);
        }
        let token = issue_token(user.id, &user.email, &self.jwt_secret)?;
        Ok(LoginOutput {
            token,
            name: user.name,
        })
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}
