//! HTTP gateway — JSON over reqwest against the configured backend.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::model::{
    AssessmentResult, DashboardSnapshot, HealthStatus, ProfileCreated, RecommendationResult,
};
use super::{RemoteGateway, operation};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::profile::ProfileSubmission;

/// Talks to the backend over HTTP.
pub struct HttpGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn url(&self, op: &str, path: &str) -> Result<Url, GatewayError> {
        self.config
            .endpoint(path)
            .map_err(|e| GatewayError::request_failed(op, e.to_string()))
    }

    /// Send a request and decode a JSON success body.
    ///
    /// Any non-2xx status is a failure regardless of body content.
    async fn call<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!(operation = op, error = %e, "Backend request failed");
            GatewayError::request_failed(op, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                operation = op,
                status = %status,
                body = %truncate(&body, 200),
                "Backend returned an error status"
            );
            return Err(GatewayError::request_failed(op, format!("HTTP {status}")));
        }

        response.json::<T>().await.map_err(|e| {
            warn!(operation = op, error = %e, "Backend response did not decode");
            GatewayError::request_failed(op, format!("invalid response body: {e}"))
        })
    }

    fn post_for_session(
        &self,
        op: &str,
        path: &str,
        session_id: &str,
    ) -> Result<reqwest::RequestBuilder, GatewayError> {
        let url = self.url(op, path)?;
        Ok(self
            .client
            .request(Method::POST, url)
            .query(&[("user_id", session_id)]))
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn create_profile(&self, profile: &ProfileSubmission) -> Result<String, GatewayError> {
        let url = self.url(operation::CREATE_PROFILE, "api/user-profile")?;
        debug!(%url, name = %profile.name, "Creating profile");
        let created: ProfileCreated = self
            .call(operation::CREATE_PROFILE, self.client.post(url).json(profile))
            .await?;
        if created.user_id.is_empty() {
            return Err(GatewayError::request_failed(
                operation::CREATE_PROFILE,
                "server returned an empty user_id",
            ));
        }
        info!(session_id = %created.user_id, "Profile created");
        Ok(created.user_id)
    }

    async fn assess_risk(&self, session_id: &str) -> Result<AssessmentResult, GatewayError> {
        debug!(%session_id, "Requesting risk assessment");
        let request =
            self.post_for_session(operation::ASSESS_RISK, "api/risk-assessment", session_id)?;
        let result: AssessmentResult = self.call(operation::ASSESS_RISK, request).await?;
        info!(%session_id, risk_score = result.risk_score, "Risk assessment received");
        Ok(result)
    }

    async fn recommend(&self, session_id: &str) -> Result<RecommendationResult, GatewayError> {
        debug!(%session_id, "Requesting recommendations");
        let request = self.post_for_session(
            operation::RECOMMEND,
            "api/investment-recommendations",
            session_id,
        )?;
        let result: RecommendationResult = self.call(operation::RECOMMEND, request).await?;
        info!(%session_id, funds = result.mutual_funds.len(), "Recommendations received");
        Ok(result)
    }

    async fn dashboard(&self, session_id: &str) -> Result<DashboardSnapshot, GatewayError> {
        let mut url = self.url(operation::DASHBOARD, "api/user/")?;
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::request_failed(operation::DASHBOARD, "base URL cannot hold a path")
            })?
            .pop_if_empty()
            .push(session_id)
            .push("dashboard");
        self.call(operation::DASHBOARD, self.client.get(url)).await
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let url = self.url(operation::HEALTH, "api/health")?;
        self.call(operation::HEALTH, self.client.get(url)).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
