//! Wizard session — what the server has handed back so far.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::gateway::{AssessmentResult, RecommendationResult};

/// Created when the server accepts a profile; discarded on restart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardSession {
    session_id: String,
    started_at: DateTime<Utc>,
    pub(crate) assessment: Option<AssessmentResult>,
    pub(crate) recommendation: Option<RecommendationResult>,
}

impl WizardSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            started_at: Utc::now(),
            assessment: None,
            recommendation: None,
        }
    }

    /// Server-issued identifier. Fixed for the session's lifetime.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn assessment(&self) -> Option<&AssessmentResult> {
        self.assessment.as_ref()
    }

    pub fn recommendation(&self) -> Option<&RecommendationResult> {
        self.recommendation.as_ref()
    }
}
