//! Intake Orchestrator — the central contract of the subsystem.
//!
//! Sequence for one submission:
//!   1. extract text (fatal on read failure)
//!   2. extract structured profile (never fatal)
//!   3. score fit against the job (never fatal, never blocks persistence)
//!   4. persist profile + score as a full overwrite (fatal on failure)
//!   5. append exactly one audit event (skipped when 4 failed)
//!
//! Guarantee: either the pipeline aborts before persistence and nothing is
//! mutated, or persistence succeeds and exactly one event is appended.
//! Steps 2 and 3 only need the raw text, so they run concurrently.

use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::events::AuditLog;
use crate::intake::extract::{extract_text, DeclaredFormat};
use crate::intake::profile::{extract_profile, CandidateProfile};
use crate::intake::scoring::{score_fit, FitAssessment};
use crate::llm_client::Inference;
use crate::models::candidate::CandidateRow;
use crate::store::{IntakeFields, RecordStore};

/// Per-call inference timeouts, independent for extraction vs scoring.
#[derive(Debug, Clone, Copy)]
pub struct IntakeTimeouts {
    pub profile: Duration,
    pub scoring: Duration,
}

#[derive(Debug)]
pub struct IntakeOutcome {
    pub candidate: CandidateRow,
    /// Whether a fit score was produced for this submission.
    pub scored: bool,
}

pub async fn run_intake(
    store: &dyn RecordStore,
    llm: &dyn Inference,
    audit: &AuditLog,
    timeouts: IntakeTimeouts,
    org_id: Uuid,
    candidate_id: Uuid,
    file_bytes: &[u8],
    format: DeclaredFormat,
) -> Result<IntakeOutcome, AppError> {
    // Scope check up front: an unknown candidate aborts before any mutation.
    let candidate = store
        .candidate(org_id, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let resume_text = extract_text(file_bytes, &format)
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    let (profile, fit) = if resume_text.is_empty() {
        // Unsupported format soft-failed to "": nothing to send to the
        // model, but the submission is still persisted and logged.
        debug!(
            candidate = %candidate_id,
            format = format.label(),
            "No text extracted; skipping profile extraction and scoring"
        );
        (CandidateProfile::default(), None)
    } else {
        tokio::join!(
            extract_profile(&resume_text, llm, timeouts.profile),
            assess_against_job(store, llm, timeouts.scoring, org_id, &candidate, &resume_text),
        )
    };

    let fields = IntakeFields {
        resume_text,
        summary: profile.summary,
        skills: profile.skills,
        experience: profile.experience,
        match_score: fit.as_ref().map(|a| a.score),
        match_details: fit.as_ref().map(FitAssessment::details),
    };

    // Full overwrite; a persistence failure is fatal and must not be
    // followed by a misleading success event.
    let updated = store
        .save_intake(org_id, candidate_id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    audit
        .resume_parsed(org_id, candidate_id, fields.match_score)
        .await?;

    info!(
        candidate = %candidate_id,
        scored = fields.match_score.is_some(),
        "Resume intake completed"
    );

    Ok(IntakeOutcome {
        candidate: updated,
        scored: fields.match_score.is_some(),
    })
}

/// Step 3: fetch the candidate's job and score against it. Every failure
/// path — no job, store error, provider error, bad output — degrades to
/// `None` so scoring can never block persistence of the profile.
async fn assess_against_job(
    store: &dyn RecordStore,
    llm: &dyn Inference,
    timeout: Duration,
    org_id: Uuid,
    candidate: &CandidateRow,
    resume_text: &str,
) -> Option<FitAssessment> {
    let job_id = candidate.job_id?;

    let job = match store.job(org_id, job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => return None,
        Err(err) => {
            warn!("Job {job_id} lookup failed, skipping fit scoring: {err}");
            return None;
        }
    };

    score_fit(resume_text, &job, llm, timeout).await
}
