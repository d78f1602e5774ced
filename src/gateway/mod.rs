//! Remote gateway — the backend calls the wizard depends on.
//!
//! Each call is a single request: no retry, no caching, no timeout beyond
//! what the transport imposes. Every failure comes back as
//! [`GatewayError::RequestFailed`].

pub mod http;
pub mod model;

pub use http::HttpGateway;
pub use model::{
    AssessmentResult, DashboardSnapshot, HealthStatus, MutualFund, ProfileCreated,
    RecommendationResult, StoredProfile,
};

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::profile::ProfileSubmission;

/// Operation names, used as the leading part of failure messages.
pub mod operation {
    pub const CREATE_PROFILE: &str = "Failed to create profile";
    pub const ASSESS_RISK: &str = "Failed to perform assessment";
    pub const RECOMMEND: &str = "Failed to get recommendations";
    pub const DASHBOARD: &str = "Failed to load dashboard";
    pub const HEALTH: &str = "Health check failed";
}

/// Backend operations the wizard issues.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Create a profile; returns the server-issued session identifier.
    async fn create_profile(&self, profile: &ProfileSubmission) -> Result<String, GatewayError>;

    /// Run the behavioral risk assessment for a session.
    async fn assess_risk(&self, session_id: &str) -> Result<AssessmentResult, GatewayError>;

    /// Generate portfolio recommendations for a session.
    async fn recommend(&self, session_id: &str) -> Result<RecommendationResult, GatewayError>;

    /// Everything the server has stored for a session.
    async fn dashboard(&self, session_id: &str) -> Result<DashboardSnapshot, GatewayError>;

    /// Backend liveness probe.
    async fn health(&self) -> Result<HealthStatus, GatewayError>;
}
