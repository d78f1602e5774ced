//! Wire models returned by the backend.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Response to profile creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCreated {
    /// Server-issued identifier correlating the remaining calls.
    #[serde(alias = "session_identifier")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of the behavioral risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// 0–10.
    pub risk_score: f64,
    pub behavioral_profile: String,
    pub confidence_level: String,
    #[serde(default)]
    pub behavioral_biases: Vec<String>,
}

/// One recommended fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualFund {
    pub fund_name: String,
    pub category: String,
    pub allocation_percentage: f64,
    pub risk_level: String,
    pub rationale: String,
}

/// Portfolio recommendation for a session.
///
/// Allocation percentages are shown as returned; they are not checked to sum
/// to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub portfolio_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    pub mutual_funds: Vec<MutualFund>,
    pub rationale: String,
    pub risk_mitigation: String,
    pub expected_returns: String,
}

impl RecommendationResult {
    /// Allocation categories with underscores shown as spaces, e.g.
    /// `large_cap_funds` → `large cap funds`.
    pub fn allocation_labels(&self) -> Vec<(String, f64)> {
        self.portfolio_allocation
            .iter()
            .map(|(category, pct)| (category.replace('_', " "), *pct))
            .collect()
    }

    pub fn rationale_lines(&self) -> Vec<&str> {
        narrative_lines(&self.rationale)
    }

    pub fn risk_mitigation_lines(&self) -> Vec<&str> {
        narrative_lines(&self.risk_mitigation)
    }
}

/// Split multi-line narrative into trimmed, non-empty lines.
pub fn narrative_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// The profile as the server stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub investment_experience: String,
    #[serde(default)]
    pub risk_tolerance: String,
    #[serde(default)]
    pub financial_goals: Vec<String>,
    #[serde(default)]
    pub investment_timeline: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Everything the server holds for one session, from
/// `GET /api/user/{id}/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub user_profile: StoredProfile,
    #[serde(default)]
    pub risk_assessment: Option<AssessmentResult>,
    #[serde(default)]
    pub recommendations: Option<RecommendationResult>,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
