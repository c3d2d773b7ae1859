use std::sync::Arc;

use infra::models::{Role, UserRow};
use infra::repos::{NewUser, UserStore};

use crate::auth::{AuthConfig, AuthUser, Claims, JwtService, PasswordService};
use crate::error::AppError;
use crate::types::{
    AuthResponse, LoginRequest, RegisterRequest, UserResponse, ValidateResponse,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
    bcrypt_cost: u32,
    /// Hash verified when the username is unknown, so both login failures
    /// cost one bcrypt verification at the configured cost.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt: JwtService,
        config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let dummy_hash = PasswordService::hash_password("no-such-user", config.bcrypt_cost)?;
        Ok(Self {
            users,
            jwt,
            bcrypt_cost: config.bcrypt_cost,
            dummy_hash,
        })
    }

    /// Unknown usernames and wrong passwords fail with the same 401 after the
    /// same bcrypt work.
    #[tracing::instrument(skip_all, fields(username = ?req.username))]
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let (Some(username), Some(password)) = (req.username, req.password) else {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ));
        };

        let user = self.users.get_by_username(&username).await?;
        let hash = user
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |u| u.password_hash.clone());
        let valid = PasswordService::verify_password_blocking(password, hash).await?;

        let user = match user {
            Some(user) if valid => user,
            Some(user) => {
                tracing::info!(user_id = user.id, "login failed: wrong password");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            None => {
                tracing::info!("login failed: unknown user");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let token = self.jwt.create_token(&user)?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Self-service sign-up. `ADMIN` accounts can only be created by an
    /// authenticated admin. A taken username is a 409 from the store's
    /// unique constraint.
    #[tracing::instrument(skip_all, fields(username = ?req.username))]
    pub async fn register(
        &self,
        caller: Option<&AuthUser>,
        req: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        let registration = req.validate()?;

        if registration.role == Role::Admin && !caller.is_some_and(AuthUser::is_admin) {
            return Err(AppError::Forbidden(
                "Only administrators may create administrator accounts".to_string(),
            ));
        }

        let user = self
            .create_user(
                registration.username,
                registration.email,
                registration.password,
                registration.role,
            )
            .await?;

        let token = self.jwt.create_token(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Creates the named admin unless the username already exists. Run at
    /// startup so a fresh deployment has an account able to grant roles.
    #[tracing::instrument(skip(self, password))]
    pub async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, AppError> {
        if let Some(existing) = self.users.get_by_username(username).await? {
            if existing.role != Role::Admin {
                tracing::warn!(user_id = existing.id, "bootstrap admin username belongs to a non-admin account");
            }
            return Ok(existing.into());
        }

        let admin = self
            .create_user(
                username.to_string(),
                email.to_string(),
                password.to_string(),
                Role::Admin,
            )
            .await?;
        tracing::info!(user_id = admin.id, "bootstrap admin created");
        Ok(admin.into())
    }

    /// Describes an already verified token. Stateless: the store is not consulted.
    pub fn validate(&self, claims: Claims) -> Result<ValidateResponse, AppError> {
        ValidateResponse::from_claims(claims)
    }

    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
        role: Role,
    ) -> Result<UserRow, AppError> {
        let password_hash = PasswordService::hash_password_blocking(password, self.bcrypt_cost).await?;
        Ok(self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
                role,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use infra::memory::MemoryStore;

    use super::*;

    fn service(bcrypt_cost: u32) -> AuthService {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_expiration_minutes: 15,
            bcrypt_cost,
        };
        let repos = MemoryStore::new().repos();
        AuthService::new(repos.users, JwtService::new(&config), &config).unwrap()
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    async fn timed(svc: &AuthService, req: LoginRequest) -> Duration {
        let started = Instant::now();
        let result = svc.login(req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        started.elapsed()
    }

    #[test]
    fn dummy_hash_uses_the_configured_cost() {
        let svc = service(5);
        assert!(svc.dummy_hash.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn unknown_user_costs_a_bcrypt_verification() {
        let svc = service(10);
        svc.ensure_admin("root", "root@dojang.test", "root-password")
            .await
            .unwrap();

        let unknown = timed(&svc, login("nobody", "whatever")).await;
        let wrong = timed(&svc, login("root", "not-the-password")).await;

        // Both paths run one cost-10 verification; a skipped verification
        // would be orders of magnitude faster.
        assert!(
            unknown * 4 > wrong,
            "unknown user took {unknown:?}, wrong password took {wrong:?}"
        );
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let svc = service(4);
        let first = svc
            .ensure_admin("root", "root@dojang.test", "root-password")
            .await
            .unwrap();
        let second = svc
            .ensure_admin("root", "root@dojang.test", "other-password")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.role, Role::Admin);
        assert!(svc.login(login("root", "root-password")).await.is_ok());
    }
}
