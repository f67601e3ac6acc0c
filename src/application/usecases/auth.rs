use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    auth::issue_access_token,
    domain::{
        entities::users::InsertUserEntity,
        repositories::users::UserRepository,
        value_objects::auth::{AuthResponse, LoginModel, RegisterModel, UserSummary},
    },
};

pub const DEFAULT_ROLE: &str = "customer";

#[derive(Debug, Error)]
pub enum AuthUseCaseError {
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthUseCaseError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthUseCaseError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthUseCaseError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthUseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthUseCaseError>;

pub struct AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
}

impl<U> AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    pub async fn register(&self, model: RegisterModel) -> AuthResult<AuthResponse> {
        let existing = self
            .user_repository
            .find_by_email(&model.email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up email");
                AuthUseCaseError::Internal(err)
            })?;

        if existing.is_some() {
            warn!(email = %model.email, "auth: registration with taken email");
            return Err(AuthUseCaseError::EmailTaken);
        }

        let password_hash = hash_password(&model.password)?;

        let user = self
            .user_repository
            .insert(InsertUserEntity {
                name: model.name,
                email: model.email,
                password_hash,
                role: DEFAULT_ROLE.to_string(),
                address: model.address,
                phone: model.phone,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to insert user");
                AuthUseCaseError::Internal(err)
            })?;

        info!(user_id = %user.id, "auth: user registered");

        let access_token = issue_access_token(user.id, &user.email, &user.role)
            .map_err(|err| AuthUseCaseError::Internal(err.0))?;

        Ok(AuthResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: UserSummary::from(user),
        })
    }

    pub async fn login(&self, model: LoginModel) -> AuthResult<AuthResponse> {
        let user = self
            .user_repository
            .find_by_email(&model.email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up email");
                AuthUseCaseError::Internal(err)
            })?
            .ok_or(AuthUseCaseError::InvalidCredentials)?;

        if !verify_password(&model.password, &user.password_hash)? {
            warn!(user_id = %user.id, "auth: wrong password");
            return Err(AuthUseCaseError::InvalidCredentials);
        }

        info!(user_id = %user.id, "auth: user logged in");

        let access_token = issue_access_token(user.id, &user.email, &user.role)
            .map_err(|err| AuthUseCaseError::Internal(err.0))?;

        Ok(AuthResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: UserSummary::from(user),
        })
    }
}

pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("password hashing failed: {}", err))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| anyhow!("stored password hash is malformed: {}", err))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
