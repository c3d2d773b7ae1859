use async_trait::async_trait;

use crate::{
    db::Db,
    error::RepoResult,
    models::{Gender, ParticipantRow, SkillLevel},
};

const COLUMNS: &str = "id, name, age, gender, skill_level, club_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ParticipantData {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub skill_level: SkillLevel,
    pub club_id: Option<i64>,
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<ParticipantRow>>;
    async fn get(&self, id: i64) -> RepoResult<Option<ParticipantRow>>;
    async fn list_by_club(&self, club_id: i64) -> RepoResult<Vec<ParticipantRow>>;
    async fn list_by_gender_and_skill_level(
        &self,
        gender: Gender,
        skill_level: SkillLevel,
    ) -> RepoResult<Vec<ParticipantRow>>;
    async fn create(&self, data: ParticipantData) -> RepoResult<ParticipantRow>;
    async fn update(&self, id: i64, data: ParticipantData)
        -> RepoResult<Option<ParticipantRow>>;
    /// Match slots pointing at the participant are set to NULL.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct ParticipantRepo {
    pool: Db,
}

impl ParticipantRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for ParticipantRepo {
    async fn list(&self) -> RepoResult<Vec<ParticipantRow>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {COLUMNS} FROM participants ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<ParticipantRow>> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {COLUMNS} FROM participants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_club(&self, club_id: i64) -> RepoResult<Vec<ParticipantRow>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {COLUMNS} FROM participants WHERE club_id = $1 ORDER BY id ASC"
        ))
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_gender_and_skill_level(
        &self,
        gender: Gender,
        skill_level: SkillLevel,
    ) -> RepoResult<Vec<ParticipantRow>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM participants
            WHERE gender = $1 AND skill_level = $2
            ORDER BY id ASC
            "#
        ))
        .bind(gender)
        .bind(skill_level)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, data: ParticipantData) -> RepoResult<ParticipantRow> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            r#"
            INSERT INTO participants (name, age, gender, skill_level, club_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(data.age)
        .bind(data.gender)
        .bind(data.skill_level)
        .bind(data.club_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        data: ParticipantData,
    ) -> RepoResult<Option<ParticipantRow>> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            r#"
            UPDATE participants
            SET name = $2,
                age = $3,
                gender = $4,
                skill_level = $5,
                club_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(data.age)
        .bind(data.gender)
        .bind(data.skill_level)
        .bind(data.club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
