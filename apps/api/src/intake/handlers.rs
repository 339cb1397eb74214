use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::Json;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::extract::DeclaredFormat;
use crate::intake::pipeline::{run_intake, IntakeTimeouts};
use crate::models::candidate::CandidateRow;
use crate::models::event::EventRow;
use crate::state::{AppState, OrgId};

/// POST /api/v1/candidates/:id/resume
///
/// Accepts a multipart upload with one `file` part. On success redirects to
/// the candidate's profile view; a fatal extraction failure returns a client
/// error with no mutation.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    OrgId(org_id): OrgId,
    Path(candidate_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let upload = read_file_part(multipart).await?;

    let format = DeclaredFormat::resolve(
        upload.content_type.as_deref(),
        upload.filename.as_deref(),
    );

    let timeouts = IntakeTimeouts {
        profile: state.config.llm_extract_timeout,
        scoring: state.config.llm_score_timeout,
    };

    run_intake(
        state.store.as_ref(),
        state.llm.as_ref(),
        &state.audit,
        timeouts,
        org_id,
        candidate_id,
        &upload.bytes,
        format,
    )
    .await?;

    Ok(Redirect::to(&format!("/api/v1/candidates/{candidate_id}")))
}

/// GET /api/v1/candidates/:id — the profile view the upload redirect targets.
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    OrgId(org_id): OrgId,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = state
        .store
        .candidate(org_id, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    Ok(Json(candidate))
}

/// GET /api/v1/candidates/:id/events — the candidate's audit timeline.
pub async fn handle_candidate_events(
    State(state): State<AppState>,
    OrgId(org_id): OrgId,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<EventRow>>, AppError> {
    let events = state
        .store
        .events_for_candidate(org_id, candidate_id)
        .await?;
    Ok(Json(events))
}

struct FilePart {
    bytes: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
}

async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        // A failure reading the upload body is an input I/O failure, which
        // is fatal for this submission.
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Extraction(format!("failed to read upload: {e}")))?;

        return Ok(FilePart {
            bytes,
            filename,
            content_type,
        });
    }

    Err(AppError::Validation(
        "multipart upload must contain a 'file' part".to_string(),
    ))
}
