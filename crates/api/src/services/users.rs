use std::sync::Arc;

use infra::models::Role;
use infra::repos::{UpdateUserData, UserStore};

use crate::auth::{AuthUser, PasswordService};
use crate::error::AppError;
use crate::types::{UserResponse, UserUpdateRequest};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<UserResponse, AppError> {
        self.store
            .get(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("User", id))
    }

    #[tracing::instrument(skip(self, caller, req), fields(caller_id = %caller.0.sub))]
    pub async fn update(
        &self,
        caller: &AuthUser,
        id: i64,
        req: UserUpdateRequest,
    ) -> Result<UserResponse, AppError> {
        caller.require_self_or_admin(id)?;

        let update = req.validate()?;

        let current = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;
        if update.role != current.role {
            caller.require_role(Role::Admin)?;
        }

        let password_hash = match update.password {
            Some(password) => {
                Some(PasswordService::hash_password_blocking(password, self.bcrypt_cost).await?)
            }
            None => None,
        };

        let user = self
            .store
            .update(
                id,
                UpdateUserData {
                    username: update.username,
                    email: update.email,
                    role: update.role,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;
        Ok(user.into())
    }

    #[tracing::instrument(skip(self, caller), fields(caller_id = %caller.0.sub))]
    pub async fn delete(&self, caller: &AuthUser, id: i64) -> Result<(), AppError> {
        caller.require_self_or_admin(id)?;
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("User", id));
        }
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
