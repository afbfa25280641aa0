use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;
use tracing::debug;

use crate::http;

pub const NAME: &str = "crt.sh";
pub const ENDPOINT: &str = "https://crt.sh/";

/// Certificate transparency lookup against crt.sh's JSON endpoint.
#[derive(Debug, Clone)]
pub struct CrtSh {
    endpoint: String,
}

impl CrtSh {
    pub fn new() -> Self {
        Self::with_endpoint(ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn fetch(&self, target: &Target, timeout: Duration) -> Result<String, ProbeError> {
        let client = http::client(NAME, timeout, true)?;
        let pattern = format!("%.{target}");
        let response = client
            .get(&self.endpoint)
            .query(&[("q", pattern.as_str()), ("output", "json")])
            .send()
            .await
            .map_err(|e| http::classify(NAME, e, timeout))?;

        debug!(status = %response.status(), "crt.sh responded.");
        let response = response
            .error_for_status()
            .map_err(|e| ProbeError::failure(NAME, e.to_string()))?;
        response.text().await.map_err(|e| http::classify(NAME, e, timeout))
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for CrtSh {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        format!("GET {}?q=%.{target}&output=json", self.endpoint)
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = match tokio::time::timeout(timeout, self.fetch(target, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::timeout(NAME, timeout)),
        };
        ProbeOutcome::from_result(NAME, result, started.elapsed())
    }
}
