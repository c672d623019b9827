//! Show repository implementation

use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::designer::Designer;
use crate::models::show::{CreateShowRequest, DesignerAssignment, Show, UpdateShowRequest};
use crate::utils::errors::RunwayVoteError;

#[derive(Debug, Clone)]
pub struct ShowRepository {
    pool: PgPool,
}

impl ShowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new show
    pub async fn create(&self, request: CreateShowRequest) -> Result<Show, RunwayVoteError> {
        let show = sqlx::query_as::<_, Show>(
            r#"
            INSERT INTO shows (name, location, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, location, start_time, end_time
            "#
        )
        .bind(request.name)
        .bind(request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(show)
    }

    /// Find show by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Show>, RunwayVoteError> {
        let show = sqlx::query_as::<_, Show>(
            "SELECT id, name, location, start_time, end_time FROM shows WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(show)
    }

    /// Update show
    pub async fn update(&self, id: i64, request: UpdateShowRequest) -> Result<Show, RunwayVoteError> {
        let show = sqlx::query_as::<_, Show>(
            r#"
            UPDATE shows
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time)
            WHERE id = $1
            RETURNING id, name, location, start_time, end_time
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(show)
    }

    /// Delete show
    pub async fn delete(&self, id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List shows with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Show>, RunwayVoteError> {
        let shows = sqlx::query_as::<_, Show>(
            "SELECT id, name, location, start_time, end_time FROM shows ORDER BY start_time ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(shows)
    }

    /// Get shows that have not ended yet, soonest first
    pub async fn get_upcoming_shows(&self, now: DateTime<Utc>) -> Result<Vec<Show>, RunwayVoteError> {
        let shows = sqlx::query_as::<_, Show>(
            "SELECT id, name, location, start_time, end_time FROM shows WHERE end_time > $1 ORDER BY start_time ASC"
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(shows)
    }

    /// Assign a designer to a show
    ///
    /// A unique violation on the (designer, show) pair is reported as AlreadyAssigned.
    pub async fn assign_designer(&self, designer_id: i64, show_id: i64) -> Result<DesignerAssignment, RunwayVoteError> {
        let result = sqlx::query_as::<_, DesignerAssignment>(
            r#"
            INSERT INTO designer_shows (designer_id, show_id, assigned_at)
            VALUES ($1, $2, $3)
            RETURNING id, designer_id, show_id, assigned_at
            "#
        )
        .bind(designer_id)
        .bind(show_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(assignment) => Ok(assignment),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RunwayVoteError::AlreadyAssigned { designer_id, show_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a designer assignment from a show
    pub async fn unassign_designer(&self, designer_id: i64, show_id: i64) -> Result<u64, RunwayVoteError> {
        let result = sqlx::query("DELETE FROM designer_shows WHERE designer_id = $1 AND show_id = $2")
            .bind(designer_id)
            .bind(show_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Get designers assigned to a show, in stable assignment order
    pub async fn get_assigned_designers(&self, show_id: i64) -> Result<Vec<Designer>, RunwayVoteError> {
        let designers = sqlx::query_as::<_, Designer>(
            r#"
            SELECT d.id, d.name, d.category, d.created_at
            FROM designers d
            INNER JOIN designer_shows ds ON d.id = ds.designer_id
            WHERE ds.show_id = $1
            ORDER BY ds.id ASC
            "#
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(designers)
    }

    /// Count total shows
    pub async fn count(&self) -> Result<i64, RunwayVoteError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
