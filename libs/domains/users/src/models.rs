use chrono::{DateTime, Utc};
use crud::Entity;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Account role carried in the token
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Stored account. Never returned as-is; see [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", with = "crud::hex_id")]
    pub id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub realm_id: Option<String>,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, with = "crud::datetime::option")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(with = "crud::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New account in its own realm with the default role
    pub fn new(email: &str, password_hash: String, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            realm_id: Some(ObjectId::new().to_hex()),
            email: normalize_email(email),
            password_hash,
            name,
            role: Role::default(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Emails are stored and looked up lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public view of a [`User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    pub realm_id: Option<String>,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            realm_id: user.realm_id,
            email: user.email,
            name: user.name,
            role: user.role,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(example = "SecurePassword123!", min_length = 6)]
    pub password: String,
    #[validate(length(max = 200))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
}

/// Token plus a summary of the account it was issued for
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub user_id: String,
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
}
