use axum::{extract::State, http::StatusCode, Json};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::types::{UserResponse, UserUpdateRequest};

// Every handler takes `AuthUser`, so anonymous callers get 401 before any lookup.

pub async fn list(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(state.users().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    _caller: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(state.users().get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UserUpdateRequest>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(state.users().update(&caller, id, req).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.users().delete(&caller, id).await?;
    Ok(StatusCode::OK)
}
