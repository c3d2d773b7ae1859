use axum::{extract::State, http::StatusCode, Json};
use infra::models::{MatchRow, Round};

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::types::MatchInput;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MatchRow>>, AppError> {
    Ok(Json(state.matches().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MatchRow>, AppError> {
    Ok(Json(state.matches().get(id).await?))
}

pub async fn by_tournament(
    State(state): State<AppState>,
    AppPath(tournament_id): AppPath<i64>,
) -> Result<Json<Vec<MatchRow>>, AppError> {
    Ok(Json(state.matches().list_by_tournament(tournament_id).await?))
}

pub async fn by_tournament_and_round(
    State(state): State<AppState>,
    AppPath((tournament_id, round)): AppPath<(i64, Round)>,
) -> Result<Json<Vec<MatchRow>>, AppError> {
    let found = state
        .matches()
        .list_by_tournament_and_round(tournament_id, round)
        .await?;
    Ok(Json(found))
}

pub async fn by_tournament_and_mat(
    State(state): State<AppState>,
    AppPath((tournament_id, mat_number)): AppPath<(i64, i32)>,
) -> Result<Json<Vec<MatchRow>>, AppError> {
    let found = state
        .matches()
        .list_by_tournament_and_mat(tournament_id, mat_number)
        .await?;
    Ok(Json(found))
}

pub async fn by_participant(
    State(state): State<AppState>,
    AppPath(participant_id): AppPath<i64>,
) -> Result<Json<Vec<MatchRow>>, AppError> {
    Ok(Json(state.matches().list_by_participant(participant_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<MatchInput>,
) -> Result<Json<MatchRow>, AppError> {
    Ok(Json(state.matches().create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<MatchInput>,
) -> Result<Json<MatchRow>, AppError> {
    Ok(Json(state.matches().update(id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.matches().delete(id).await?;
    Ok(StatusCode::OK)
}
