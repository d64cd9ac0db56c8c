use async_trait::async_trait;
use axum_helpers::{AppError, JwtAuth, JwtClaims, PrincipalResolver};
use crud::Repository;
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{AuthError, AuthResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse, normalize_email};

/// bcrypt work factor for stored password hashes
pub const BCRYPT_COST: u32 = 10;

/// Registration, login and token-subject lookup
pub struct AuthService<R: Repository<User>> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: Repository<User>> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

impl<R: Repository<User>> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Create an account and sign a token for it
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> AuthResult<AuthResponse> {
        if self.get_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailInUse);
        }

        let password_hash = hash_password(input.password).await?;
        let user = User::new(&input.email, password_hash, input.name);

        let user = self.repository.insert(user).await.map_err(|e| match e {
            crud::CrudError::Conflict(_) => AuthError::EmailInUse,
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, "New user registered");
        self.auth_response(&user)
    }

    /// Check credentials, record the login and sign a token
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> AuthResult<AuthResponse> {
        let mut user = self
            .get_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        user.touch_login();
        let user = self
            .repository
            .replace(user)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.auth_response(&user)
    }

    /// Account behind a token subject, if it still exists
    pub async fn validate_user(&self, user_id: &str) -> AuthResult<Option<UserResponse>> {
        let Ok(id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };
        let user = self.repository.find_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    pub async fn get_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let user = self
            .repository
            .find_one(doc! { "email": normalize_email(email) })
            .await?;
        Ok(user)
    }

    fn auth_response(&self, user: &User) -> AuthResult<AuthResponse> {
        let role = user.role.to_string();
        let access_token = self
            .jwt
            .create_token(&user.id, &user.email, &role)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        Ok(AuthResponse {
            access_token,
            user_id: user.id.clone(),
            email: user.email.clone(),
            role,
        })
    }
}

#[async_trait]
impl<R: Repository<User> + 'static> PrincipalResolver for AuthService<R> {
    type Principal = UserResponse;

    async fn resolve(&self, claims: &JwtClaims) -> Result<Option<UserResponse>, AppError> {
        Ok(self.validate_user(&claims.sub).await?)
    }
}

async fn hash_password(password: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
        .map_err(AuthError::from)
}

async fn verify_password(password: String, hash: String) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
        .map_err(AuthError::from)
}
