use std::sync::Arc;

use infra::models::{MatchRow, Round};
use infra::repos::MatchStore;

use crate::error::AppError;
use crate::types::MatchInput;

#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<MatchRow>, AppError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<MatchRow, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Match", id))
    }

    pub async fn list_by_tournament(&self, tournament_id: i64) -> Result<Vec<MatchRow>, AppError> {
        Ok(self.store.list_by_tournament(tournament_id).await?)
    }

    pub async fn list_by_tournament_and_round(
        &self,
        tournament_id: i64,
        round: Round,
    ) -> Result<Vec<MatchRow>, AppError> {
        Ok(self
            .store
            .list_by_tournament_and_round(tournament_id, round)
            .await?)
    }

    pub async fn list_by_tournament_and_mat(
        &self,
        tournament_id: i64,
        mat_number: i32,
    ) -> Result<Vec<MatchRow>, AppError> {
        Ok(self
            .store
            .list_by_tournament_and_mat(tournament_id, mat_number)
            .await?)
    }

    /// Every match the participant fights in, whichever side they are on.
    pub async fn list_by_participant(
        &self,
        participant_id: i64,
    ) -> Result<Vec<MatchRow>, AppError> {
        Ok(self.store.list_by_participant(participant_id).await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: MatchInput) -> Result<MatchRow, AppError> {
        let data = input.validate()?;
        let bout = self.store.create(data).await?;
        tracing::info!(
            match_id = bout.id,
            tournament_id = ?bout.tournament_id,
            mat = bout.mat_number,
            "match scheduled"
        );
        Ok(bout)
    }

    /// Full replace. Recording a result is an update that sets `winnerId`.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: MatchInput) -> Result<MatchRow, AppError> {
        let data = input.validate()?;
        let bout = self
            .store
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::not_found("Match", id))?;
        if let Some(winner) = bout.winner_id {
            tracing::info!(match_id = bout.id, winner_id = winner, "match result recorded");
        }
        Ok(bout)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Match", id));
        }
        Ok(())
    }
}
