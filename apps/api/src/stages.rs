//! Candidate stage state machine.
//!
//! Validation is membership-only, not transition-adjacency: recruiters skip
//! stages legitimately, so `NEW -> HIRED` is allowed while any value outside
//! the known set is rejected without mutation. The machine is a synchronous
//! validator over persisted state; optimistic UI updates and rollback are the
//! board's concern, not ours.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::state::{AppState, OrgId};
use crate::store::RecordStore;

/// The fixed, ordered hiring pipeline, plus the `REJECTED` side-state
/// reachable from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    New,
    PhoneScreen,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::New,
        Stage::PhoneScreen,
        Stage::Interview,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "NEW",
            Stage::PhoneScreen => "PHONE_SCREEN",
            Stage::Interview => "INTERVIEW",
            Stage::Offer => "OFFER",
            Stage::Hired => "HIRED",
            Stage::Rejected => "REJECTED",
        }
    }

    /// Membership check over the known set. Anything else is an unknown
    /// stage, including casing variants — the board sends canonical names.
    pub fn parse(raw: &str) -> Option<Stage> {
        Stage::ALL.iter().copied().find(|s| s.as_str() == raw)
    }
}

/// Validates and applies a stage change for one candidate.
///
/// Unknown target stages are rejected before any store call, so a failed
/// validation can never mutate the record. Two concurrent transitions for
/// the same candidate are last-write-wins; there is no version token.
pub async fn transition(
    store: &dyn RecordStore,
    org_id: Uuid,
    candidate_id: Uuid,
    target: &str,
) -> Result<(CandidateRow, Stage), AppError> {
    let stage = Stage::parse(target).ok_or_else(|| AppError::InvalidStage(target.to_string()))?;

    let updated = store
        .set_stage(org_id, candidate_id, stage.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    Ok((updated, stage))
}

#[derive(Debug, Deserialize)]
pub struct StageChangeRequest {
    pub stage: String,
}

/// POST /api/v1/candidates/:id/stage
pub async fn handle_stage_change(
    State(state): State<AppState>,
    OrgId(org_id): OrgId,
    Path(candidate_id): Path<Uuid>,
    Json(req): Json<StageChangeRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    let prior = state
        .store
        .candidate(org_id, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let (updated, stage) = transition(state.store.as_ref(), org_id, candidate_id, &req.stage).await?;

    // Stage events are advisory timeline entries; a failed append does not
    // invalidate the transition itself.
    if let Err(err) = state
        .audit
        .stage_changed(org_id, candidate_id, &prior.stage, stage)
        .await
    {
        warn!("Failed to append stage-change event: {err}");
    }

    Ok(Json(updated))
}
