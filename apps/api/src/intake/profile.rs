//! Structured Profile Extractor — one inference call, parsed into a fixed
//! schema. Malformed model output must not abort the pipeline: any failure
//! here degrades to the empty-but-valid profile.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::intake::prompts::{PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM};
use crate::llm_client::{parse_json_reply, Inference};

/// Fixed profile schema. Every field defaults, so a partially-conforming
/// model response still yields a usable profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
}

/// Extracts a structured profile from resume text.
///
/// Never fails: transport errors (already retried inside the client) and
/// unparseable output both degrade to `CandidateProfile::default()`.
pub async fn extract_profile(
    resume_text: &str,
    llm: &dyn Inference,
    timeout: Duration,
) -> CandidateProfile {
    let prompt = PROFILE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);

    let reply = match llm.complete(PROFILE_SYSTEM, &prompt, timeout).await {
        Ok(text) => text,
        Err(err) => {
            warn!("Profile extraction call failed, continuing with empty profile: {err}");
            return CandidateProfile::default();
        }
    };

    match parse_json_reply::<CandidateProfile>(&reply) {
        Ok(mut profile) => {
            profile.skills = normalize_skills(profile.skills);
            // The model is told to leave raw_text empty; the pipeline owns
            // the authoritative extracted text.
            profile.raw_text = resume_text.to_string();
            profile
        }
        Err(err) => {
            warn!("Profile extraction returned malformed JSON, continuing with empty profile: {err}");
            CandidateProfile::default()
        }
    }
}

/// Trims entries, drops empties, and de-duplicates case-insensitively while
/// keeping first-occurrence order.
fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for skill in skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blanks_and_duplicates() {
        let skills = vec![
            " Go ".to_string(),
            "go".to_string(),
            "".to_string(),
            "Rust".to_string(),
        ];
        assert_eq!(normalize_skills(skills), vec!["Go", "Rust"]);
    }

    #[test]
    fn normalize_preserves_first_occurrence_order() {
        let skills = vec![
            "PostgreSQL".to_string(),
            "Go".to_string(),
            "postgresql".to_string(),
        ];
        assert_eq!(normalize_skills(skills), vec!["PostgreSQL", "Go"]);
    }

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let profile: CandidateProfile = serde_json::from_str(r#"{"summary": "hi"}"#).unwrap();
        assert_eq!(profile.summary, "hi");
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn default_profile_is_empty_but_valid() {
        let profile = CandidateProfile::default();
        assert_eq!(profile.summary, "");
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
        assert_eq!(profile.raw_text, "");
    }
}
