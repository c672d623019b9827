//! Registration repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::participant::Participant;
use crate::models::registration::Registration;
use crate::models::show::Show;
use crate::utils::errors::RunwayVoteError;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a registration for a participant and show
    ///
    /// A unique violation on the (participant, show) pair is reported as
    /// AlreadyRegistered, covering the concurrent-duplicate race.
    pub async fn create(&self, participant_id: i64, show_id: i64) -> Result<Registration, RunwayVoteError> {
        let result = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO participant_shows (participant_id, show_id, registered_at)
            VALUES ($1, $2, $3)
            RETURNING id, participant_id, show_id, registered_at
            "#
        )
        .bind(participant_id)
        .bind(show_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(registration) => Ok(registration),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RunwayVoteError::AlreadyRegistered { show_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a registration by its (participant, show) key
    pub async fn find(&self, participant_id: i64, show_id: i64) -> Result<Option<Registration>, RunwayVoteError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, participant_id, show_id, registered_at FROM participant_shows WHERE participant_id = $1 AND show_id = $2"
        )
        .bind(participant_id)
        .bind(show_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Delete a registration by its (participant, show) key
    pub async fn delete(&self, participant_id: i64, show_id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM participant_shows WHERE participant_id = $1 AND show_id = $2")
            .bind(participant_id)
            .bind(show_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Check if a participant is registered for a show
    pub async fn is_registered(&self, participant_id: i64, show_id: i64) -> Result<bool, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM participant_shows WHERE participant_id = $1 AND show_id = $2"
        )
        .bind(participant_id)
        .bind(show_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Get the shows a participant is registered for, soonest first
    ///
    /// Used by the registration rule checker, so each row carries the show's
    /// full time window.
    pub async fn get_registered_shows(&self, participant_id: i64) -> Result<Vec<Show>, RunwayVoteError> {
        let shows = sqlx::query_as::<_, Show>(
            r#"
            SELECT s.id, s.name, s.location, s.start_time, s.end_time
            FROM shows s
            INNER JOIN participant_shows ps ON s.id = ps.show_id
            WHERE ps.participant_id = $1
            ORDER BY s.start_time ASC
            "#
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shows)
    }

    /// Get the participants registered for a show, in registration order
    pub async fn get_participants_for_show(&self, show_id: i64) -> Result<Vec<Participant>, RunwayVoteError> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.id, p.name, p.email, p.registered_at
            FROM participants p
            INNER JOIN participant_shows ps ON p.id = ps.participant_id
            WHERE ps.show_id = $1
            ORDER BY ps.id ASC
            "#
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Count registrations for a show
    pub async fn count_for_show(&self, show_id: i64) -> Result<i64, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM participant_shows WHERE show_id = $1"
        )
        .bind(show_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
