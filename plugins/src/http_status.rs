use std::time::Duration;

use async_trait::async_trait;
use reckon_common::error::ProbeError;
use reckon_common::ports::StatusProbe;
use reckon_common::target::Target;

use crate::http;

pub const NAME: &str = "http-status";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// A single `HEAD https://host` request. Redirects are not followed so the reported code
/// is the host's own answer.
#[derive(Debug, Clone)]
pub struct HttpStatus {
    scheme: &'static str,
    timeout: Duration,
}

impl HttpStatus {
    pub fn new() -> Self {
        Self {
            scheme: "https",
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn plain_http(mut self) -> Self {
        self.scheme = "http";
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusProbe for HttpStatus {
    fn name(&self) -> &str {
        NAME
    }

    async fn status(&self, host: &Target) -> Result<u16, ProbeError> {
        let client = http::client(NAME, self.timeout, false)?;
        let url = format!("{}://{host}", self.scheme);
        let response = client
            .head(&url)
            .send()
            .await
            .map_err(|e| http::classify(NAME, e, self.timeout))?;
        Ok(response.status().as_u16())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reports_status_without_following_redirects() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 301 Moved Permanently\r\nLocation: http://127.0.0.1:1/\r\nContent-Length: 0\r\n\r\n")
                .await
                .unwrap();
        });

        // The listener's port rides along in the host so the request stays on loopback.
        let probe = HttpStatus::new().plain_http();
        let host = Target::parse(&format!("127.0.0.1:{port}")).unwrap();
        assert_eq!(probe.status(&host).await.unwrap(), 301);
    }
}
