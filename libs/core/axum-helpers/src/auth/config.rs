use core_config::{ConfigError, FromEnv, env_parse, env_required};

use super::jwt::DEFAULT_TOKEN_TTL_SECS;

const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 86_400;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_EXPIRES_IN_SECS` (default 86400, at most [`MAX_TOKEN_TTL_SECS`])
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Lifetime of issued tokens
    pub expires_in_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            expires_in_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    pub fn with_expires_in(mut self, secs: u64) -> Result<Self, ConfigError> {
        check_expires_in(secs)?;
        self.expires_in_secs = secs;
        Ok(self)
    }
}

fn check_expires_in(secs: u64) -> Result<(), ConfigError> {
    if secs == 0 || secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::ParseError {
            key: "JWT_EXPIRES_IN_SECS".to_string(),
            details: format!("must be between 1 and {MAX_TOKEN_TTL_SECS} seconds (got {secs})"),
        });
    }
    Ok(())
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;

        let expires_in_secs = env_parse("JWT_EXPIRES_IN_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        check_expires_in(expires_in_secs)?;

        Ok(Self {
            secret,
            expires_in_secs,
        })
    }
}
