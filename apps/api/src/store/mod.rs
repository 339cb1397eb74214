//! Record store — org-scoped persistence for candidates, jobs, and events.
//!
//! The pipeline and the stage machine depend on the [`RecordStore`] trait,
//! not on Postgres directly, so tests can run against an in-memory fake.
//! Every method takes the organization id; a record belonging to another org
//! is indistinguishable from a missing record.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::CandidateRow;
use crate::models::event::{EventRow, NewEvent};
use crate::models::job::JobRow;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Profile and scoring fields written by one intake invocation.
/// Persisting these is a full overwrite, not a merge: re-running intake on
/// the same candidate replaces prior extraction output.
#[derive(Debug, Clone)]
pub struct IntakeFields {
    pub resume_text: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub match_score: Option<i32>,
    pub match_details: Option<Value>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn candidate(&self, org_id: Uuid, id: Uuid)
        -> Result<Option<CandidateRow>, StoreError>;

    async fn job(&self, org_id: Uuid, id: Uuid) -> Result<Option<JobRow>, StoreError>;

    /// Overwrites the candidate's profile and scoring fields.
    /// Returns `None` when the candidate does not exist in this org.
    async fn save_intake(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        fields: &IntakeFields,
    ) -> Result<Option<CandidateRow>, StoreError>;

    /// Direct stage write; the caller has already validated membership.
    async fn set_stage(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        stage: &str,
    ) -> Result<Option<CandidateRow>, StoreError>;

    /// Appends one audit event. Append-only, no idempotency: retried
    /// operations produce additional rows.
    async fn append_event(&self, event: &NewEvent) -> Result<(), StoreError>;

    /// The candidate's audit timeline, oldest first.
    async fn events_for_candidate(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<EventRow>, StoreError>;
}

/// Production store over PostgreSQL.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn candidate(
        &self,
        org_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE id = $1 AND org_id = $2",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn job(&self, org_id: Uuid, id: Uuid) -> Result<Option<JobRow>, StoreError> {
        let row =
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND org_id = $2")
                .bind(id)
                .bind(org_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn save_intake(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        fields: &IntakeFields,
    ) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates
            SET resume_text = $1,
                summary = $2,
                skills = $3,
                experience = $4,
                match_score = $5,
                match_details = $6,
                updated_at = NOW()
            WHERE id = $7 AND org_id = $8
            RETURNING *
            "#,
        )
        .bind(&fields.resume_text)
        .bind(&fields.summary)
        .bind(&fields.skills)
        .bind(&fields.experience)
        .bind(fields.match_score)
        .bind(&fields.match_details)
        .bind(candidate_id)
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_stage(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        stage: &str,
    ) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates
            SET stage = $1, updated_at = NOW()
            WHERE id = $2 AND org_id = $3
            RETURNING *
            "#,
        )
        .bind(stage)
        .bind(candidate_id)
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn append_event(&self, event: &NewEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO events (id, org_id, event_type, candidate_id, employee_id, summary)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.org_id)
        .bind(event.event_type.as_str())
        .bind(event.candidate_id)
        .bind(event.employee_id)
        .bind(&event.summary)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn events_for_candidate(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<EventRow>, StoreError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT * FROM events
            WHERE org_id = $1 AND candidate_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(org_id)
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
