use chrono::{Duration, Utc};
use infra::models::{Role, UserRow};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthConfig;
use crate::error::AppError;

/// Access token payload. `sub` is the user id in decimal; `iat`/`exp` are
/// Unix seconds; `jti` is a random v4 UUID per issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(user: &UserRow, expiration_minutes: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(expiration_minutes as i64);

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

/// HS256 token issuer/verifier. Keys are derived once from the configured secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_minutes: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_minutes: config.access_token_expiration_minutes,
        }
    }

    pub fn create_token(&self, user: &UserRow) -> Result<String, AppError> {
        let claims = Claims::new(user, self.expiration_minutes);
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Checks signature and expiry; never touches the store.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn service(secret: &str) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_expiration_minutes: 15,
            bcrypt_cost: 4,
        })
    }

    fn user() -> UserRow {
        UserRow {
            id: 7,
            username: "coach".to_string(),
            email: "coach@dojang.test".to_string(),
            password_hash: "$2b$04$unused".to_string(),
            role: Role::Club,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_carries_identity_and_role() {
        let jwt = service("test-secret");
        let token = jwt.create_token(&user()).unwrap();

        let claims = assert_ok!(jwt.verify_token(&token));
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.username, "coach");
        assert_eq!(claims.role, Role::Club);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = service("secret-a").create_token(&user()).unwrap();
        let err = assert_err!(service("secret-b").verify_token(&token));
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service("test-secret");
        let mut claims = Claims::new(&user(), 15);
        claims.iat = (Utc::now() - Duration::hours(2)).timestamp();
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = jwt.encode(&claims).unwrap();

        assert_err!(jwt.verify_token(&token));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_err!(service("test-secret").verify_token("dummy-token-for-now"));
    }
}
