use axum::{extract::State, http::StatusCode, Json};
use infra::models::ParticipantRow;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;
use crate::types::{ParticipantInput, ParticipantSearch};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ParticipantRow>>, AppError> {
    Ok(Json(state.participants().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ParticipantRow>, AppError> {
    Ok(Json(state.participants().get(id).await?))
}

pub async fn by_club(
    State(state): State<AppState>,
    AppPath(club_id): AppPath<i64>,
) -> Result<Json<Vec<ParticipantRow>>, AppError> {
    Ok(Json(state.participants().list_by_club(club_id).await?))
}

/// `?gender=FEMALE&skillLevel=GREEN_BELT`
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ParticipantSearch>,
) -> Result<Json<Vec<ParticipantRow>>, AppError> {
    let found = state
        .participants()
        .search(params.gender, params.skill_level)
        .await?;
    Ok(Json(found))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ParticipantInput>,
) -> Result<Json<ParticipantRow>, AppError> {
    Ok(Json(state.participants().create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<ParticipantInput>,
) -> Result<Json<ParticipantRow>, AppError> {
    Ok(Json(state.participants().update(id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.participants().delete(id).await?;
    Ok(StatusCode::OK)
}
