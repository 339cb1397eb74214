use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read-only collaborator for the intake pipeline: fetched, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    /// Returns the description if it carries any non-whitespace content.
    /// Scoring is only meaningful against a real job description.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job(description: Option<&str>) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            title: "Senior Backend Engineer".to_string(),
            description: description.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_description_yields_none() {
        assert_eq!(job(None).description_text(), None);
    }

    #[test]
    fn blank_description_yields_none() {
        assert_eq!(job(Some("   \n\t")).description_text(), None);
    }

    #[test]
    fn real_description_is_trimmed() {
        assert_eq!(
            job(Some("  Go required  ")).description_text(),
            Some("Go required")
        );
    }
}
