use std::sync::Arc;

use infra::models::{Gender, ParticipantRow, SkillLevel};
use infra::repos::ParticipantStore;

use crate::error::AppError;
use crate::types::ParticipantInput;

#[derive(Clone)]
pub struct ParticipantService {
    store: Arc<dyn ParticipantStore>,
}

impl ParticipantService {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ParticipantRow>, AppError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<ParticipantRow, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Participant", id))
    }

    /// Members of a club. An unknown club simply has no members.
    pub async fn list_by_club(&self, club_id: i64) -> Result<Vec<ParticipantRow>, AppError> {
        Ok(self.store.list_by_club(club_id).await?)
    }

    pub async fn search(
        &self,
        gender: Gender,
        skill_level: SkillLevel,
    ) -> Result<Vec<ParticipantRow>, AppError> {
        Ok(self
            .store
            .list_by_gender_and_skill_level(gender, skill_level)
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, input: ParticipantInput) -> Result<ParticipantRow, AppError> {
        let data = input.validate()?;
        let participant = self.store.create(data).await?;
        tracing::info!(participant_id = participant.id, "participant registered");
        Ok(participant)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: ParticipantInput,
    ) -> Result<ParticipantRow, AppError> {
        let data = input.validate()?;
        self.store
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::not_found("Participant", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Participant", id));
        }
        Ok(())
    }
}
