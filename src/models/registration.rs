//! Registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A participant's registration for a show, unique per (participant, show) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub participant_id: i64,
    pub show_id: i64,
    pub registered_at: DateTime<Utc>,
}
