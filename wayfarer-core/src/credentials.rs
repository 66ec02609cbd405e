//! Password hashing and bearer-token issuance.
//!
//! Passwords are hashed with bcrypt on tokio's blocking pool; tokens are HS256 JWTs signed
//! with a single shared secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use wayfarer_shared::Masked;

use crate::{CoreError, CoreResult};

pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 60 * 60 * 24;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: Masked<String>,
    pub expiration: u64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Masked::new(secret.into()),
            expiration: DEFAULT_TOKEN_TTL_SECONDS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccountClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Clone)]
pub struct Credentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: u64,
    bcrypt_cost: u32,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("expiration", &self.expiration)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.secret.expose().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiration: config.expiration,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub async fn hash_password(&self, password: &str) -> CoreResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| CoreError::InternalError(format!("Hashing task failed: {}", e)))?
            .map_err(|e| CoreError::InternalError(format!("Password hashing failed: {}", e)))
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> CoreResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| CoreError::InternalError(format!("Hashing task failed: {}", e)))?
            .map_err(|e| CoreError::InternalError(format!("Password verification failed: {}", e)))
    }

    pub fn issue_token(&self, account_id: Uuid) -> CoreResult<String> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.expiration)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                CoreError::InternalError(format!(
                    "Token expiration out of range: {}s",
                    self.expiration
                ))
            })?;

        let claims = AccountClaims {
            sub: account_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| CoreError::InternalError(format!("Token encoding failed: {}", e)))
    }

    /// Resolve a bearer token to the account id it was issued for.
    pub fn authenticate(&self, token: Option<&str>) -> CoreResult<Uuid> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(CoreError::MissingToken)?;

        let token_data = decode::<AccountClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| CoreError::InvalidToken(e.to_string()))?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| CoreError::InvalidToken(format!("Malformed subject: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        let mut config = AuthConfig::new("test-secret");
        config.bcrypt_cost = 4;
        Credentials::new(&config)
    }

    #[tokio::test]
    async fn password_round_trip() {
        let creds = credentials();
        let hash = creds.hash_password("secret123").await.unwrap();

        assert_ne!(hash, "secret123");
        assert!(creds.verify_password("secret123", &hash).await.unwrap());
        assert!(!creds.verify_password("secret124", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let creds = credentials();
        let a = creds.hash_password("secret123").await.unwrap();
        let b = creds.hash_password("secret123").await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_resolves_to_subject() {
        let creds = credentials();
        let id = Uuid::new_v4();
        let token = creds.issue_token(id).unwrap();

        assert_eq!(creds.authenticate(Some(&token)).unwrap(), id);
    }

    #[test]
    fn tokens_for_same_subject_are_distinct() {
        let creds = credentials();
        let id = Uuid::new_v4();
        let first = creds.issue_token(id).unwrap();
        let second = creds.issue_token(id).unwrap();

        assert_ne!(first, second);
        assert_eq!(creds.authenticate(Some(&second)).unwrap(), id);
    }

    #[test]
    fn oversized_expiration_is_an_error() {
        let mut config = AuthConfig::new("test-secret");
        config.expiration = u64::MAX;
        let creds = Credentials::new(&config);
        assert!(matches!(
            creds.issue_token(Uuid::new_v4()),
            Err(CoreError::InternalError(_))
        ));

        config.expiration = i64::MAX as u64;
        let creds = Credentials::new(&config);
        assert!(matches!(
            creds.issue_token(Uuid::new_v4()),
            Err(CoreError::InternalError(_))
        ));
    }

    #[test]
    fn missing_token_is_rejected() {
        let creds = credentials();
        assert!(matches!(creds.authenticate(None), Err(CoreError::MissingToken)));
        assert!(matches!(creds.authenticate(Some("  ")), Err(CoreError::MissingToken)));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = Credentials::new(&AuthConfig::new("someone-else"));
        let token = other.issue_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            credentials().authenticate(Some(&token)),
            Err(CoreError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let claims = AccountClaims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::days(2)).timestamp() as usize,
            exp: (now - Duration::days(1)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            credentials().authenticate(Some(&token)),
            Err(CoreError::InvalidToken(_))
        ));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let claims = AccountClaims {
            sub: "guest-42".into(),
            iat: Utc::now().timestamp() as usize,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            credentials().authenticate(Some(&token)),
            Err(CoreError::InvalidToken(_))
        ));
    }
}
