use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One applicant to one job, scoped to an organization.
///
/// The profile and scoring fields are written only by the intake pipeline;
/// `stage` is written only by the stage state machine. The two field sets are
/// disjoint, so the writers never contend on the same columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub org_id: Uuid,
    /// Weak reference to the job this candidate applied for; not owned.
    pub job_id: Option<Uuid>,
    pub name: String,
    pub stage: String,
    /// Raw text extracted from the uploaded resume. Empty for uploads in
    /// formats the extractor does not understand.
    pub resume_text: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    /// 0–100 fit score, absent when scoring was skipped or failed.
    pub match_score: Option<i32>,
    /// Structured rationale for the score: strengths, gaps, notes.
    pub match_details: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
