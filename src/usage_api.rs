//! Client for the Claude OAuth usage endpoint.

use std::time::Duration;

use tracing::{debug, warn};

use crate::models::UsageLimits;

pub const USAGE_ENDPOINT: &str = "https://api.anthropic.com/api/oauth/usage";
pub const ANTHROPIC_BETA: &str = "oauth-2025-04-20";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches fresh usage limits with a bearer token. One attempt, no retries.
pub trait UsageClient: Send + Sync {
    fn fetch_limits(&self, token: &str) -> Option<UsageLimits>;
}

#[derive(Debug, Clone)]
pub struct HttpUsageClient {
    endpoint: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for HttpUsageClient {
    fn default() -> Self {
        Self {
            endpoint: USAGE_ENDPOINT.to_string(),
            user_agent: default_user_agent(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl HttpUsageClient {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .http_status_as_error(false)
            .build()
            .into()
    }
}

impl UsageClient for HttpUsageClient {
    fn fetch_limits(&self, token: &str) -> Option<UsageLimits> {
        let response = self
            .agent()
            .get(self.endpoint.as_str())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .header("Authorization", format!("Bearer {token}").as_str())
            .header("anthropic-beta", ANTHROPIC_BETA)
            .call();

        let mut response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "usage request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "usage endpoint returned non-success");
            return None;
        }

        let body: serde_json::Value = match response.body_mut().read_json() {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "usage response was not json");
                return None;
            }
        };
        Some(UsageLimits::from_value(&body))
    }
}

fn default_user_agent() -> String {
    format!("claude-dashboard/{}", env!("CARGO_PKG_VERSION"))
}
