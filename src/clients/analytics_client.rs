//! Typed client for the remote evasion-analytics API.
//!
//! Every operation is a read-only GET that insulates the caller from the
//! remote dependency: transport failures, bad statuses and undecodable
//! bodies are logged here and surfaced as `None`, never as a raised fault.
//! A dashboard built on this client renders "data unavailable" when the
//! analytics service is down; it does not crash.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::clients::decode::from_lenient_json;
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::{EvasionReport, StudentDetail, StudentProfile};

/// Analytics API client.
///
/// Holds one `reqwest::Client` (connection pool); clone-cheap and safe to
/// share across concurrent callers. Requests are independent and cancel
/// when their future is dropped.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalyticsClient {
    /// Create a new analytics client from the application configuration.
    ///
    /// Failing to build the underlying HTTP client is a startup error, not
    /// a degraded result.
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::RequestFailed {
                endpoint: config.analytics_base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.analytics_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the aggregate evasion report.
    ///
    /// Returns `None` when the analytics service is unreachable or answers
    /// with something undecodable.
    pub async fn evasion_report(&self) -> Option<EvasionReport> {
        match self.get_json("/api/evasion-report", &[]).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("failed to fetch evasion report: {}", e);
                None
            }
        }
    }

    /// Fetch the at-risk student list for one professor.
    ///
    /// The name is percent-encoded into the query string, so spaces and
    /// accented characters are safe.
    pub async fn professor_evasion_risk(&self, professor_name: &str) -> Option<Vec<StudentDetail>> {
        let query = [("professor_name", professor_name)];
        match self
            .get_json("/api/professor-evasion-risk", &query)
            .await
        {
            Ok(students) => Some(students),
            Err(e) => {
                error!(
                    "failed to fetch evasion risk for professor '{}': {}",
                    professor_name, e
                );
                None
            }
        }
    }

    /// Fetch one student's global risk profile.
    ///
    /// A 404 ("no such student") and a transport failure both surface as
    /// `None`; only the log line tells them apart.
    pub async fn student_profile(&self, user_id: &str) -> Option<StudentDetail> {
        let endpoint = format!("/api/student-profile/{}", user_id);
        match self.get_json(&endpoint, &[]).await {
            Ok(detail) => Some(detail),
            Err(e) if e.is_not_found() => {
                debug!("student '{}' not found or has insufficient data", user_id);
                None
            }
            Err(e) => {
                error!("failed to fetch profile for student '{}': {}", user_id, e);
                None
            }
        }
    }

    /// Fetch one student's profile with its detailed recent-action list.
    pub async fn student_profile_detailed(&self, user_id: &str) -> Option<StudentProfile> {
        let endpoint = format!("/api/student-profile/{}", user_id);
        match self.get_json(&endpoint, &[]).await {
            Ok(profile) => Some(profile),
            Err(e) if e.is_not_found() => {
                debug!("student '{}' not found or has insufficient data", user_id);
                None
            }
            Err(e) => {
                error!(
                    "failed to fetch detailed profile for student '{}': {}",
                    user_id, e
                );
                None
            }
        }
    }

    /// Fetch the raw activity log rows behind the analytics service.
    ///
    /// Rows are schemaless, so they come back as plain JSON values.
    /// `force_refresh` asks the service to reload its cache from disk first.
    pub async fn raw_logs(&self, force_refresh: bool) -> Option<Vec<serde_json::Value>> {
        let query: &[(&str, &str)] = if force_refresh {
            &[("force_refresh", "true")]
        } else {
            &[]
        };
        match self.get_json("/api/raw-logs", query).await {
            Ok(rows) => Some(rows),
            Err(e) => {
                error!("failed to fetch raw logs: {}", e);
                None
            }
        }
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one GET and decode the body under the shared lenient policy.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                endpoint: endpoint.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        from_lenient_json(&body).map_err(|e| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}
