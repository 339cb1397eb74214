//! Job Fit Scorer — best-effort assessment of resume vs job description.
//!
//! Returns `None` without any external call when the job has no real
//! description. The score is the load-bearing field: a response whose
//! `score` is not numeric invalidates the whole assessment, but never the
//! submission it belongs to.

use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::intake::prompts::{FIT_PROMPT_TEMPLATE, FIT_SYSTEM};
use crate::llm_client::{parse_json_reply, Inference};
use crate::models::job::JobRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitAssessment {
    /// 0–100, clamped after numeric validation.
    pub score: i32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub notes: String,
}

impl FitAssessment {
    /// Rationale persisted alongside the score on the candidate record.
    pub fn details(&self) -> Value {
        json!({
            "strengths": self.strengths,
            "gaps": self.gaps,
            "notes": self.notes,
        })
    }
}

/// Scores the resume against the job. Every failure path degrades to `None`;
/// the caller persists the profile regardless.
pub async fn score_fit(
    resume_text: &str,
    job: &JobRow,
    llm: &dyn Inference,
    timeout: Duration,
) -> Option<FitAssessment> {
    let description = job.description_text()?;

    let prompt = FIT_PROMPT_TEMPLATE
        .replace("{job_description}", description)
        .replace("{resume_text}", resume_text);

    let reply = match llm.complete(FIT_SYSTEM, &prompt, timeout).await {
        Ok(text) => text,
        Err(err) => {
            warn!("Fit scoring call failed, continuing without a score: {err}");
            return None;
        }
    };

    let value = match parse_json_reply::<Value>(&reply) {
        Ok(value) => value,
        Err(err) => {
            warn!("Fit scoring returned malformed JSON, continuing without a score: {err}");
            return None;
        }
    };

    let assessment = assessment_from_value(&value);
    if assessment.is_none() {
        warn!("Fit scoring returned a non-numeric score, discarding the result");
    }
    assessment
}

/// Validates and shapes a raw model response. `None` when `score` is absent
/// or not a number; the other fields default when missing.
fn assessment_from_value(value: &Value) -> Option<FitAssessment> {
    let score = value.get("score")?.as_f64()?;
    let score = score.round().clamp(0.0, 100.0) as i32;

    Some(FitAssessment {
        score,
        strengths: string_array(value.get("strengths")),
        gaps: string_array(value.get("gaps")),
        notes: value
            .get("notes")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
