//! Audit event logger — appends immutable, org-scoped events describing
//! pipeline outcomes. Fire-and-forget from the caller's point of view, but
//! an append must complete (or fail loudly) before the caller reports
//! success; a persisted intake with no event is not a legal end state.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::event::{EventType, NewEvent};
use crate::stages::Stage;
use crate::store::{RecordStore, StoreError};

#[derive(Clone)]
pub struct AuditLog {
    store: Arc<dyn RecordStore>,
}

impl AuditLog {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// One event per completed intake invocation, whether or not scoring
    /// produced anything.
    pub async fn resume_parsed(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        score: Option<i32>,
    ) -> Result<(), StoreError> {
        self.store
            .append_event(&NewEvent {
                org_id,
                event_type: EventType::ResumeParsed,
                candidate_id: Some(candidate_id),
                employee_id: None,
                summary: intake_summary(score),
            })
            .await
    }

    pub async fn stage_changed(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        from: &str,
        to: Stage,
    ) -> Result<(), StoreError> {
        self.store
            .append_event(&NewEvent {
                org_id,
                event_type: EventType::StageChanged,
                candidate_id: Some(candidate_id),
                employee_id: None,
                summary: format!("Candidate moved from {} to {}", from, to.as_str()),
            })
            .await
    }
}

fn intake_summary(score: Option<i32>) -> String {
    match score {
        Some(score) => format!("Resume parsed; fit score {score}/100"),
        None => "Resume uploaded and parsed".to_string(),
    }
}
