use std::sync::Arc;

use chrono::NaiveDate;
use infra::models::TournamentRow;
use infra::repos::TournamentStore;

use crate::error::AppError;
use crate::types::TournamentInput;

#[derive(Clone)]
pub struct TournamentService {
    store: Arc<dyn TournamentStore>,
}

impl TournamentService {
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<TournamentRow>, AppError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<TournamentRow, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tournament", id))
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<TournamentRow>, AppError> {
        Ok(self.store.list_by_date(date).await?)
    }

    /// Both bounds inclusive; an inverted range yields nothing.
    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TournamentRow>, AppError> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.store.list_by_date_between(start, end).await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: TournamentInput) -> Result<TournamentRow, AppError> {
        let data = input.validate()?;
        let tournament = self.store.create(data).await?;
        tracing::info!(
            tournament_id = tournament.id,
            date = %tournament.date,
            "tournament created"
        );
        Ok(tournament)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: TournamentInput,
    ) -> Result<TournamentRow, AppError> {
        let data = input.validate()?;
        self.store
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::not_found("Tournament", id))
    }

    /// Removes the tournament and its matches.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Tournament", id));
        }
        tracing::info!(tournament_id = id, "tournament deleted");
        Ok(())
    }
}
