//! Resume intake pipeline: text extraction, structured profile extraction,
//! best-effort job-fit scoring, persistence, and audit logging.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod profile;
pub mod prompts;
pub mod scoring;
