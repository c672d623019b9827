//! Designer repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::designer::{CreateDesignerRequest, Designer, UpdateDesignerRequest};
use crate::utils::errors::RunwayVoteError;

#[derive(Debug, Clone)]
pub struct DesignerRepository {
    pool: PgPool,
}

impl DesignerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new designer
    pub async fn create(&self, request: CreateDesignerRequest) -> Result<Designer, RunwayVoteError> {
        let designer = sqlx::query_as::<_, Designer>(
            r#"
            INSERT INTO designers (name, category, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, category, created_at
            "#
        )
        .bind(request.name)
        .bind(request.category)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(designer)
    }

    /// Find designer by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Designer>, RunwayVoteError> {
        let designer = sqlx::query_as::<_, Designer>(
            "SELECT id, name, category, created_at FROM designers WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(designer)
    }

    /// Update designer
    pub async fn update(&self, id: i64, request: UpdateDesignerRequest) -> Result<Designer, RunwayVoteError> {
        let designer = sqlx::query_as::<_, Designer>(
            r#"
            UPDATE designers
            SET name = COALESCE($2, name),
                category = COALESCE($3, category)
            WHERE id = $1
            RETURNING id, name, category, created_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(designer)
    }

    /// Delete designer
    pub async fn delete(&self, id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM designers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List designers ordered by creation time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Designer>, RunwayVoteError> {
        let designers = sqlx::query_as::<_, Designer>(
            "SELECT id, name, category, created_at FROM designers ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(designers)
    }

    /// Count total designers
    pub async fn count(&self) -> Result<i64, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM designers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
