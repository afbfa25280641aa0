use std::time::Duration;

use reckon_common::error::ProbeError;
use reqwest::redirect::Policy;

pub const USER_AGENT: &str = concat!("reckon/", env!("CARGO_PKG_VERSION"));

/// Builds a client whose every request is bounded by `timeout`.
pub fn client(tool: &str, timeout: Duration, follow_redirects: bool) -> Result<reqwest::Client, ProbeError> {
    let policy = if follow_redirects {
        Policy::limited(5)
    } else {
        Policy::none()
    };
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .redirect(policy)
        .build()
        .map_err(|e| ProbeError::failure(tool, format!("http client: {e}")))
}

/// Maps a request error onto the probe failure taxonomy.
pub fn classify(tool: &str, error: reqwest::Error, timeout: Duration) -> ProbeError {
    if error.is_timeout() {
        ProbeError::timeout(tool, timeout)
    } else {
        ProbeError::failure(tool, error.to_string())
    }
}
