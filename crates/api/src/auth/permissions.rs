use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use infra::models::Role;

use crate::auth::Claims;
use crate::error::AppError;
use crate::middleware::jwt::RejectedToken;

/// Authenticated caller, taken from the claims the JWT middleware attached.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }
        let message = if parts.extensions.get::<RejectedToken>().is_some() {
            "Invalid or expired token"
        } else {
            "Missing bearer token"
        };
        Err(AppError::Unauthorized(message.to_string()))
    }
}

/// `Option<AuthUser>`: anonymous callers, and callers whose token was
/// rejected, extract as `None`.
impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Claims>().cloned().map(AuthUser))
    }
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    pub fn require_role(&self, required_role: Role) -> Result<(), AppError> {
        if has_required_role(self.0.role, required_role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Access denied: {} privileges required. Your current role is {}",
                required_role, self.0.role
            )))
        }
    }

    /// Admins act on any user; everyone else only on themselves.
    pub fn require_self_or_admin(&self, user_id: i64) -> Result<(), AppError> {
        if self.is_admin() || self.0.user_id()? == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Access denied: you may only manage your own account".to_string(),
            ))
        }
    }
}

fn has_required_role(user_role: Role, required_role: Role) -> bool {
    match required_role {
        Role::Admin => user_role == Role::Admin,
        Role::Club => user_role == Role::Club || user_role == Role::Admin, // Admin has club permissions
        Role::User => true,
    }
}
