use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One-way "I want to team up with you" record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub date_matched: DateTime<Utc>,
}
