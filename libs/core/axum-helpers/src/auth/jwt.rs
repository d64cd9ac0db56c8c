use super::config::JwtConfig;
use chrono::{TimeDelta, Utc};
use eyre::eyre;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime when `JWT_EXPIRES_IN_SECS` is unset (24 hours)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // User ID (hex ObjectId)
    pub email: String, // User email
    pub role: String,  // "user" or "admin"
    pub iat: i64,      // Issued at
    pub exp: i64,      // Expiration time
}

/// HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.expires_in_secs, "JWT auth initialized");
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: i64::try_from(config.expires_in_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a token for `user_id`
    pub fn create_token(&self, user_id: &str, email: &str, role: &str) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = TimeDelta::try_seconds(self.ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| eyre!("token lifetime of {}s is out of range", self.ttl_secs))?;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature and expiry, then decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::MAX_TOKEN_TTL_SECS;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    #[test]
    fn test_token_round_trip_keeps_claims() {
        let auth = auth();
        let token = auth
            .create_token("65a1f0c2e4b0a1b2c3d4e5f6", "ada@example.com", "user")
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtAuth::new(&JwtConfig::new("ffffffffffffffffffffffffffffffff").unwrap());
        let token = other.create_token("id", "a@b.c", "user").unwrap();
        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: "id".into(),
            email: "a@b.c".into(),
            role: "user".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let mut config = JwtConfig::new(SECRET).unwrap();
        config.expires_in_secs = u64::MAX;
        let auth = JwtAuth::new(&config);
        assert!(auth.create_token("id", "a@b.c", "user").is_err());
    }

    #[test]
    fn test_longest_accepted_lifetime_signs() {
        let config = JwtConfig::new(SECRET)
            .unwrap()
            .with_expires_in(MAX_TOKEN_TTL_SECS)
            .unwrap();
        let auth = JwtAuth::new(&config);
        let claims = auth
            .verify_token(&auth.create_token("id", "a@b.c", "user").unwrap())
            .unwrap();
        assert_eq!(
            (claims.exp - claims.iat) as u64,
            MAX_TOKEN_TTL_SECS
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(auth().verify_token("not.a.jwt").is_err());
    }
}
