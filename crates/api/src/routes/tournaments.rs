use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use infra::models::TournamentRow;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;
use crate::types::{DateRange, TournamentInput};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TournamentRow>>, AppError> {
    Ok(Json(state.tournaments().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<TournamentRow>, AppError> {
    Ok(Json(state.tournaments().get(id).await?))
}

pub async fn by_date(
    State(state): State<AppState>,
    AppPath(date): AppPath<NaiveDate>,
) -> Result<Json<Vec<TournamentRow>>, AppError> {
    Ok(Json(state.tournaments().list_by_date(date).await?))
}

pub async fn by_date_range(
    State(state): State<AppState>,
    AppQuery(range): AppQuery<DateRange>,
) -> Result<Json<Vec<TournamentRow>>, AppError> {
    let found = state
        .tournaments()
        .list_by_date_range(range.start_date, range.end_date)
        .await?;
    Ok(Json(found))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<TournamentInput>,
) -> Result<Json<TournamentRow>, AppError> {
    Ok(Json(state.tournaments().create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<TournamentInput>,
) -> Result<Json<TournamentRow>, AppError> {
    Ok(Json(state.tournaments().update(id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.tournaments().delete(id).await?;
    Ok(StatusCode::OK)
}
