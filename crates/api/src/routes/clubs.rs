use axum::{extract::State, http::StatusCode, Json};
use infra::models::ClubRow;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::types::ClubInput;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ClubRow>>, AppError> {
    Ok(Json(state.clubs().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ClubRow>, AppError> {
    Ok(Json(state.clubs().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ClubInput>,
) -> Result<Json<ClubRow>, AppError> {
    Ok(Json(state.clubs().create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<ClubInput>,
) -> Result<Json<ClubRow>, AppError> {
    Ok(Json(state.clubs().update(id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.clubs().delete(id).await?;
    Ok(StatusCode::OK)
}
