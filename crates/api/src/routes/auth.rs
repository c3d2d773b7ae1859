use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, ValidateResponse};

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(state.auth().login(req).await?))
}

/// Anonymous, or an admin creating another admin.
pub async fn register(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(state.auth().register(caller.as_ref(), req).await?))
}

/// The bearer middleware has already verified the token by the time this runs.
pub async fn validate(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ValidateResponse>, AppError> {
    Ok(Json(state.auth().validate(claims)?))
}
