//! Activity log model and DTOs.

use chrono::NaiveDate;
use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the append-only `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub student_id: DbId,
    pub lesson_id: Option<DbId>,
    pub event_type: String,
    pub occurred_at: Timestamp,
    pub activity_date: NaiveDate,
    pub duration_minutes: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivity {
    pub event_type: String,
    pub lesson_id: Option<DbId>,
    pub duration_minutes: Option<i32>,
}
