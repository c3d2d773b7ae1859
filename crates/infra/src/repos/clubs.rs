use async_trait::async_trait;

use crate::{db::Db, error::RepoResult, models::ClubRow};

/// Every mutable club field; used for both insert and full replace.
#[derive(Debug, Clone)]
pub struct ClubData {
    pub name: String,
    pub location: Option<String>,
}

#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<ClubRow>>;
    async fn get(&self, id: i64) -> RepoResult<Option<ClubRow>>;
    async fn create(&self, data: ClubData) -> RepoResult<ClubRow>;
    async fn update(&self, id: i64, data: ClubData) -> RepoResult<Option<ClubRow>>;
    /// Deleting a club deletes its participants (`ON DELETE CASCADE`).
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct ClubRepo {
    pool: Db,
}

impl ClubRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubStore for ClubRepo {
    async fn list(&self) -> RepoResult<Vec<ClubRow>> {
        let rows = sqlx::query_as::<_, ClubRow>(
            r#"
            SELECT id, name, location, created_at, updated_at
            FROM clubs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<ClubRow>> {
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            SELECT id, name, location, created_at, updated_at
            FROM clubs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, data: ClubData) -> RepoResult<ClubRow> {
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            INSERT INTO clubs (name, location)
            VALUES ($1, $2)
            RETURNING id, name, location, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, data: ClubData) -> RepoResult<Option<ClubRow>> {
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
            UPDATE clubs
            SET name = $2,
                location = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, location, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
