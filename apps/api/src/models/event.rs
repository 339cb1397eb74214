use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of audit event. Stored as its SCREAMING_SNAKE_CASE wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    ResumeParsed,
    StageChanged,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ResumeParsed => "RESUME_PARSED",
            EventType::StageChanged => "STAGE_CHANGED",
        }
    }
}

/// An event about to be appended. Events are append-only: retried operations
/// append additional rows, forming a timeline of attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub org_id: Uuid,
    pub event_type: EventType,
    pub candidate_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub summary: String,
}

/// A persisted audit event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub event_type: String,
    pub candidate_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
