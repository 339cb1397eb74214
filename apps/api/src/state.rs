use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::events::AuditLog;
use crate::llm_client::Inference;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Org-scoped persistence. Trait object so tests can wire an in-memory fake.
    pub store: Arc<dyn RecordStore>,
    /// Language Model Service client, same substitution seam as the store.
    pub llm: Arc<dyn Inference>,
    pub audit: AuditLog,
    pub config: Config,
}

const ORG_HEADER: &str = "x-org-id";

/// Organization scope for a request. Every downstream store and event call
/// requires it; requests without a valid org id are rejected up front.
pub struct OrgId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OrgId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ORG_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map(OrgId)
            .ok_or_else(|| {
                AppError::Validation("missing or invalid X-Org-Id header".to_string())
            })
    }
}
