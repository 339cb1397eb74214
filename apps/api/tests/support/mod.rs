#![allow(dead_code)]

//! Shared fakes for the integration suites: an in-memory record store and a
//! scripted inference client, both implementing the production traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use api::config::Config;
use api::events::AuditLog;
use api::intake::prompts::{FIT_SYSTEM, PROFILE_SYSTEM};
use api::llm_client::{Inference, LlmError};
use api::models::candidate::CandidateRow;
use api::models::event::{EventRow, NewEvent};
use api::models::job::JobRow;
use api::state::AppState;
use api::store::{IntakeFields, RecordStore, StoreError};

// ───────────────────────── record store fake ─────────────────────────

#[derive(Default)]
pub struct InMemoryStore {
    candidates: Mutex<HashMap<Uuid, CandidateRow>>,
    jobs: Mutex<HashMap<Uuid, JobRow>>,
    pub events: Mutex<Vec<NewEvent>>,
    pub fail_saves: AtomicBool,
    pub fail_job_fetch: AtomicBool,
    pub fail_appends: AtomicBool,
}

impl InMemoryStore {
    pub fn seed_candidate(&self, org_id: Uuid, job_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.candidates.lock().unwrap().insert(
            id,
            CandidateRow {
                id,
                org_id,
                job_id,
                name: "Jordan Example".to_string(),
                stage: "NEW".to_string(),
                resume_text: None,
                summary: None,
                skills: vec![],
                experience: vec![],
                match_score: None,
                match_details: None,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn seed_job(&self, org_id: Uuid, description: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.jobs.lock().unwrap().insert(
            id,
            JobRow {
                id,
                org_id,
                title: "Senior Backend Engineer".to_string(),
                description: description.map(String::from),
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn candidate_snapshot(&self, id: Uuid) -> CandidateRow {
        self.candidates.lock().unwrap().get(&id).unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn last_event(&self) -> NewEvent {
        self.events.lock().unwrap().last().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn candidate(
        &self,
        org_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CandidateRow>, StoreError> {
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .get(&id)
            .filter(|c| c.org_id == org_id)
            .cloned())
    }

    async fn job(&self, org_id: Uuid, id: Uuid) -> Result<Option<JobRow>, StoreError> {
        if self.fail_job_fetch.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("job lookup failed".to_string()));
        }
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .get(&id)
            .filter(|j| j.org_id == org_id)
            .cloned())
    }

    async fn save_intake(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        fields: &IntakeFields,
    ) -> Result<Option<CandidateRow>, StoreError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("save failed".to_string()));
        }
        let mut candidates = self.candidates.lock().unwrap();
        let Some(candidate) = candidates
            .get_mut(&candidate_id)
            .filter(|c| c.org_id == org_id)
        else {
            return Ok(None);
        };
        candidate.resume_text = Some(fields.resume_text.clone());
        candidate.summary = Some(fields.summary.clone());
        candidate.skills = fields.skills.clone();
        candidate.experience = fields.experience.clone();
        candidate.match_score = fields.match_score;
        candidate.match_details = fields.match_details.clone();
        candidate.updated_at = Utc::now();
        Ok(Some(candidate.clone()))
    }

    async fn set_stage(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
        stage: &str,
    ) -> Result<Option<CandidateRow>, StoreError> {
        let mut candidates = self.candidates.lock().unwrap();
        let Some(candidate) = candidates
            .get_mut(&candidate_id)
            .filter(|c| c.org_id == org_id)
        else {
            return Ok(None);
        };
        candidate.stage = stage.to_string();
        candidate.updated_at = Utc::now();
        Ok(Some(candidate.clone()))
    }

    async fn append_event(&self, event: &NewEvent) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("event append failed".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn events_for_candidate(
        &self,
        org_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<EventRow>, StoreError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.org_id == org_id && e.candidate_id == Some(candidate_id))
            .map(|e| EventRow {
                id: Uuid::new_v4(),
                org_id: e.org_id,
                event_type: e.event_type.as_str().to_string(),
                candidate_id: e.candidate_id,
                employee_id: e.employee_id,
                summary: e.summary.clone(),
                created_at: Utc::now(),
            })
            .collect())
    }
}

// ───────────────────────── inference fake ─────────────────────────

pub enum Reply {
    Text(String),
    Fail(u16),
}

/// Scripted inference client. Replies are keyed by system prompt so the
/// pipeline's concurrent profile and scoring calls stay deterministic.
pub struct ScriptedInference {
    profile_reply: Mutex<Reply>,
    fit_reply: Mutex<Reply>,
    pub profile_calls: AtomicUsize,
    pub fit_calls: AtomicUsize,
}

impl ScriptedInference {
    pub fn new(profile_reply: Reply, fit_reply: Reply) -> Self {
        Self {
            profile_reply: Mutex::new(profile_reply),
            fit_reply: Mutex::new(fit_reply),
            profile_calls: AtomicUsize::new(0),
            fit_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_profile_reply(&self, reply: Reply) {
        *self.profile_reply.lock().unwrap() = reply;
    }

    pub fn set_fit_reply(&self, reply: Reply) {
        *self.fit_reply.lock().unwrap() = reply;
    }

    pub fn total_calls(&self) -> usize {
        self.profile_calls.load(Ordering::Relaxed) + self.fit_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Inference for ScriptedInference {
    async fn complete(
        &self,
        system: &str,
        _prompt: &str,
        _timeout: Duration,
    ) -> Result<String, LlmError> {
        let slot = if system == PROFILE_SYSTEM {
            self.profile_calls.fetch_add(1, Ordering::Relaxed);
            &self.profile_reply
        } else {
            assert_eq!(system, FIT_SYSTEM, "unexpected system prompt");
            self.fit_calls.fetch_add(1, Ordering::Relaxed);
            &self.fit_reply
        };

        match &*slot.lock().unwrap() {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

// ───────────────────────── fixtures ─────────────────────────

pub const RESUME_TEXT: &str = "5 years of backend engineering, Go, distributed systems";

pub fn profile_json() -> Reply {
    Reply::Text(
        r#"{
            "summary": "Backend engineer with five years on distributed systems.",
            "skills": ["Go", "Distributed Systems"],
            "experience": ["5 years of backend engineering"],
            "raw_text": ""
        }"#
        .to_string(),
    )
}

pub fn fit_json(score: i32) -> Reply {
    Reply::Text(format!(
        r#"{{"score": {score}, "strengths": ["Go required and present"], "gaps": [], "notes": "Strong backend match."}}"#
    ))
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        llm_base_url: "http://unused".to_string(),
        llm_api_key: "test-key".to_string(),
        llm_extract_timeout: Duration::from_secs(5),
        llm_score_timeout: Duration::from_secs(5),
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn test_state(store: Arc<InMemoryStore>, llm: Arc<ScriptedInference>) -> AppState {
    AppState {
        audit: AuditLog::new(store.clone()),
        store,
        llm,
        config: test_config(),
    }
}
