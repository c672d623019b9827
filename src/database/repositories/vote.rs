//! Vote repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::vote::{Vote, VoteWithDetails};
use crate::utils::errors::RunwayVoteError;

#[derive(Debug, Clone)]
pub struct VoteRepository {
    pool: PgPool,
}

impl VoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a vote unless the (participant, designer, show) key already exists
    ///
    /// Returns the number of rows created (0 or 1). A concurrent duplicate
    /// submission resolves through the unique constraint as 0, the idempotent
    /// "already voted" outcome. A missing designer or show surfaces as the
    /// corresponding not-found error rather than a raw foreign-key violation.
    pub async fn insert_if_absent(&self, participant_id: i64, designer_id: i64, show_id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query(
            r#"
            INSERT INTO votes (participant_id, designer_id, show_id, voted_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (participant_id, designer_id, show_id) DO NOTHING
            "#
        )
        .bind(participant_id)
        .bind(designer_id)
        .bind(show_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                match db.constraint() {
                    Some("votes_designer_id_fkey") => Err(RunwayVoteError::DesignerNotFound { designer_id }),
                    Some("votes_show_id_fkey") => Err(RunwayVoteError::ShowNotFound { show_id }),
                    _ => Err(RunwayVoteError::ParticipantNotFound { participant_id }),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a vote by its (participant, designer, show) key
    pub async fn find(&self, participant_id: i64, designer_id: i64, show_id: i64) -> Result<Option<Vote>, RunwayVoteError> {
        let vote = sqlx::query_as::<_, Vote>(
            "SELECT id, participant_id, designer_id, show_id, voted_at, image_ref FROM votes WHERE participant_id = $1 AND designer_id = $2 AND show_id = $3"
        )
        .bind(participant_id)
        .bind(designer_id)
        .bind(show_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }

    /// Delete a vote by its (participant, designer, show) key
    pub async fn delete(&self, participant_id: i64, designer_id: i64, show_id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM votes WHERE participant_id = $1 AND designer_id = $2 AND show_id = $3")
            .bind(participant_id)
            .bind(designer_id)
            .bind(show_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Record a stored image reference on a vote
    pub async fn set_image_ref(&self, vote_id: i64, image_ref: Option<&str>) -> Result<Vote, RunwayVoteError> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            UPDATE votes
            SET image_ref = $2
            WHERE id = $1
            RETURNING id, participant_id, designer_id, show_id, voted_at, image_ref
            "#
        )
        .bind(vote_id)
        .bind(image_ref)
        .fetch_one(&self.pool)
        .await?;

        Ok(vote)
    }

    /// Get a participant's votes within a show
    pub async fn get_votes_for_participant_in_show(&self, participant_id: i64, show_id: i64) -> Result<Vec<Vote>, RunwayVoteError> {
        let votes = sqlx::query_as::<_, Vote>(
            "SELECT id, participant_id, designer_id, show_id, voted_at, image_ref FROM votes WHERE participant_id = $1 AND show_id = $2 ORDER BY voted_at ASC"
        )
        .bind(participant_id)
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(votes)
    }

    /// Count votes per designer for a show
    pub async fn count_by_designer_for_show(&self, show_id: i64) -> Result<Vec<(i64, i64)>, RunwayVoteError> {
        let counts: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT designer_id, COUNT(*) FROM votes WHERE show_id = $1 GROUP BY designer_id"
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Count all votes for a show
    pub async fn count_for_show(&self, show_id: i64) -> Result<i64, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM votes WHERE show_id = $1"
        )
        .bind(show_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// List all votes joined with participant, designer, and show names
    pub async fn list_with_details(&self) -> Result<Vec<VoteWithDetails>, RunwayVoteError> {
        let votes = sqlx::query_as::<_, VoteWithDetails>(
            r#"
            SELECT v.id, v.participant_id, p.name AS participant_name,
                   v.designer_id, d.name AS designer_name,
                   v.show_id, s.name AS show_name, v.voted_at
            FROM votes v
            INNER JOIN participants p ON v.participant_id = p.id
            INNER JOIN designers d ON v.designer_id = d.id
            INNER JOIN shows s ON v.show_id = s.id
            ORDER BY v.voted_at DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(votes)
    }
}
