//! Participant repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::participant::{CreateParticipantRequest, Participant, UpdateParticipantRequest};
use crate::utils::errors::RunwayVoteError;

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new participant
    ///
    /// A unique violation on the email column is reported as EmailTaken.
    pub async fn create(&self, request: CreateParticipantRequest) -> Result<Participant, RunwayVoteError> {
        let result = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (name, email, registered_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, registered_at
            "#
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(participant) => Ok(participant),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RunwayVoteError::EmailTaken { email: request.email })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Participant>, RunwayVoteError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, name, email, registered_at FROM participants WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Find participant by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, RunwayVoteError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, name, email, registered_at FROM participants WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Update participant
    pub async fn update(&self, id: i64, request: UpdateParticipantRequest) -> Result<Participant, RunwayVoteError> {
        let result = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, name, email, registered_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(&request.email)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(participant) => Ok(participant),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RunwayVoteError::EmailTaken {
                    email: request.email.unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete participant
    pub async fn delete(&self, id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List participants ordered by registration time
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Participant>, RunwayVoteError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, name, email, registered_at FROM participants ORDER BY registered_at ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Count total participants
    pub async fn count(&self) -> Result<i64, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
