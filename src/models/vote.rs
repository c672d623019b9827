//! Vote model and tally result types

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A participant's vote for one designer in one show, unique per
/// (participant, designer, show) triple
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vote {
    pub id: i64,
    pub participant_id: i64,
    pub designer_id: i64,
    pub show_id: i64,
    pub voted_at: DateTime<Utc>,
    pub image_ref: Option<String>,
}

/// A vote joined with the names of its participant, designer, and show
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VoteWithDetails {
    pub id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub designer_id: i64,
    pub designer_name: String,
    pub show_id: i64,
    pub show_name: String,
    pub voted_at: DateTime<Utc>,
}

/// A batch of designer selections submitted in one voting action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSubmission {
    pub show_id: i64,
    pub designer_ids: Vec<i64>,
}

/// Per-designer vote count within a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignerTally {
    pub designer_id: i64,
    pub name: String,
    pub category: String,
    pub vote_count: i64,
}

/// Aggregated vote counts for a show, ordered by descending count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowTally {
    pub show_id: i64,
    pub show_name: String,
    pub total_votes: i64,
    pub designers: Vec<DesignerTally>,
}

/// Tally plus the caller's own selections, for the voting page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotePage {
    pub tally: ShowTally,
    pub voted_designer_ids: Vec<i64>,
}
