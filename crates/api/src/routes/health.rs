use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;

/// Liveness plus a round-trip to the store.
pub async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.health().ping().await?;
    Ok("ok")
}
