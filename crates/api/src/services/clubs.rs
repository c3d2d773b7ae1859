use std::sync::Arc;

use infra::models::ClubRow;
use infra::repos::ClubStore;

use crate::error::AppError;
use crate::types::ClubInput;

#[derive(Clone)]
pub struct ClubService {
    store: Arc<dyn ClubStore>,
}

impl ClubService {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ClubRow>, AppError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<ClubRow, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Club", id))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: ClubInput) -> Result<ClubRow, AppError> {
        let data = input.validate()?;
        let club = self.store.create(data).await?;
        tracing::info!(club_id = club.id, "club created");
        Ok(club)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ClubInput) -> Result<ClubRow, AppError> {
        let data = input.validate()?;
        self.store
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::not_found("Club", id))
    }

    /// Removes the club together with its participants.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Club", id));
        }
        tracing::info!(club_id = id, "club deleted");
        Ok(())
    }
}
