use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{
    db::Db,
    error::RepoResult,
    models::{MatchRow, Round},
};

const COLUMNS: &str = "id, match_id, mat_number, match_order, participant1_id, participant2_id, \
                       winner_id, round, tournament_id, scheduled_time, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct MatchData {
    pub match_id: Option<String>,
    pub mat_number: i32,
    pub match_order: i32,
    pub participant1_id: Option<i64>,
    pub participant2_id: Option<i64>,
    pub winner_id: Option<i64>,
    pub round: Round,
    pub tournament_id: Option<i64>,
    pub scheduled_time: Option<NaiveDateTime>,
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<MatchRow>>;
    async fn get(&self, id: i64) -> RepoResult<Option<MatchRow>>;
    async fn list_by_tournament(&self, tournament_id: i64) -> RepoResult<Vec<MatchRow>>;
    async fn list_by_tournament_and_round(
        &self,
        tournament_id: i64,
        round: Round,
    ) -> RepoResult<Vec<MatchRow>>;
    async fn list_by_tournament_and_mat(
        &self,
        tournament_id: i64,
        mat_number: i32,
    ) -> RepoResult<Vec<MatchRow>>;
    /// Matches where the participant occupies either slot, each match once.
    async fn list_by_participant(&self, participant_id: i64) -> RepoResult<Vec<MatchRow>>;
    async fn create(&self, data: MatchData) -> RepoResult<MatchRow>;
    async fn update(&self, id: i64, data: MatchData) -> RepoResult<Option<MatchRow>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct MatchRepo {
    pool: Db,
}

impl MatchRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for MatchRepo {
    async fn list(&self) -> RepoResult<Vec<MatchRow>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {COLUMNS} FROM matches ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<MatchRow>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_tournament(&self, tournament_id: i64) -> RepoResult<Vec<MatchRow>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {COLUMNS} FROM matches WHERE tournament_id = $1 ORDER BY id ASC"
        ))
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_tournament_and_round(
        &self,
        tournament_id: i64,
        round: Round,
    ) -> RepoResult<Vec<MatchRow>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM matches
            WHERE tournament_id = $1 AND round = $2
            ORDER BY id ASC
            "#
        ))
        .bind(tournament_id)
        .bind(round)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_tournament_and_mat(
        &self,
        tournament_id: i64,
        mat_number: i32,
    ) -> RepoResult<Vec<MatchRow>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM matches
            WHERE tournament_id = $1 AND mat_number = $2
            ORDER BY id ASC
            "#
        ))
        .bind(tournament_id)
        .bind(mat_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_participant(&self, participant_id: i64) -> RepoResult<Vec<MatchRow>> {
        // A single predicate over both slots keeps each row once.
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM matches
            WHERE participant1_id = $1 OR participant2_id = $1
            ORDER BY id ASC
            "#
        ))
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, data: MatchData) -> RepoResult<MatchRow> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO matches (
                match_id, mat_number, match_order, participant1_id, participant2_id,
                winner_id, round, tournament_id, scheduled_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&data.match_id)
        .bind(data.mat_number)
        .bind(data.match_order)
        .bind(data.participant1_id)
        .bind(data.participant2_id)
        .bind(data.winner_id)
        .bind(data.round)
        .bind(data.tournament_id)
        .bind(data.scheduled_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, data: MatchData) -> RepoResult<Option<MatchRow>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            UPDATE matches
            SET match_id = $2,
                mat_number = $3,
                match_order = $4,
                participant1_id = $5,
                participant2_id = $6,
                winner_id = $7,
                round = $8,
                tournament_id = $9,
                scheduled_time = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.match_id)
        .bind(data.mat_number)
        .bind(data.match_order)
        .bind(data.participant1_id)
        .bind(data.participant2_id)
        .bind(data.winner_id)
        .bind(data.round)
        .bind(data.tournament_id)
        .bind(data.scheduled_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
