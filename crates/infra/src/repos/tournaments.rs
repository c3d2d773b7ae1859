use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;

use crate::{
    db::Db,
    error::RepoResult,
    models::{TournamentCategory, TournamentRow},
};

const COLUMNS: &str =
    "id, name, location, date, number_of_mats, categories, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct TournamentData {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub number_of_mats: i32,
    pub categories: Vec<TournamentCategory>,
}

#[async_trait]
pub trait TournamentStore: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<TournamentRow>>;
    async fn get(&self, id: i64) -> RepoResult<Option<TournamentRow>>;
    async fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<TournamentRow>>;
    /// Inclusive on both ends; an inverted range yields nothing.
    async fn list_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<TournamentRow>>;
    async fn create(&self, data: TournamentData) -> RepoResult<TournamentRow>;
    async fn update(&self, id: i64, data: TournamentData) -> RepoResult<Option<TournamentRow>>;
    /// Deleting a tournament deletes its matches (`ON DELETE CASCADE`).
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct TournamentRepo {
    pool: Db,
}

impl TournamentRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TournamentStore for TournamentRepo {
    async fn list(&self) -> RepoResult<Vec<TournamentRow>> {
        let rows = sqlx::query_as::<_, TournamentRow>(&format!(
            "SELECT {COLUMNS} FROM tournaments ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<TournamentRow>> {
        let row = sqlx::query_as::<_, TournamentRow>(&format!(
            "SELECT {COLUMNS} FROM tournaments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<TournamentRow>> {
        let rows = sqlx::query_as::<_, TournamentRow>(&format!(
            "SELECT {COLUMNS} FROM tournaments WHERE date = $1 ORDER BY id ASC"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<TournamentRow>> {
        let rows = sqlx::query_as::<_, TournamentRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM tournaments
            WHERE date BETWEEN $1 AND $2
            ORDER BY id ASC
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, data: TournamentData) -> RepoResult<TournamentRow> {
        let row = sqlx::query_as::<_, TournamentRow>(&format!(
            r#"
            INSERT INTO tournaments (name, location, date, number_of_mats, categories)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(&data.location)
        .bind(data.date)
        .bind(data.number_of_mats)
        .bind(Json(&data.categories))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, data: TournamentData) -> RepoResult<Option<TournamentRow>> {
        let row = sqlx::query_as::<_, TournamentRow>(&format!(
            r#"
            UPDATE tournaments
            SET name = $2,
                location = $3,
                date = $4,
                number_of_mats = $5,
                categories = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.location)
        .bind(data.date)
        .bind(data.number_of_mats)
        .bind(Json(&data.categories))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
