//! WHOIS lookups: the local `whois` client first, then raw port-43 queries.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::process::{ExternalTool, Invocation};

pub const CLI_NAME: &str = "whois";
pub const WHOIS_PORT: u16 = 43;

/// Servers tried in order after the local client. Verisign covers .com/.net, IANA the
/// root, and the last two answer for most other TLDs.
pub const FALLBACK_SERVERS: [&str; 4] = [
    "whois.verisign-grs.com",
    "whois.iana.org",
    "whois.nic.ru",
    "whois.godaddy.com",
];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct WhoisCli {
    tool: ExternalTool,
}

impl WhoisCli {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::new(CLI_NAME),
        }
    }
}

impl Default for WhoisCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for WhoisCli {
    fn name(&self) -> &str {
        CLI_NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&Invocation::new([target.as_str()]))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = match self.tool.execute(Invocation::new([target.as_str()]), timeout).await {
            Ok(output) => output.require_success(CLI_NAME).map(|o| o.stdout),
            Err(e) => Err(e),
        };
        ProbeOutcome::from_result(CLI_NAME, result, started.elapsed())
    }
}

/// A direct query to one WHOIS server.
#[derive(Debug, Clone)]
pub struct WhoisServer {
    host: String,
    port: u16,
}

impl WhoisServer {
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_port(host, WHOIS_PORT)
    }

    pub fn with_port(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// One probe per entry of [`FALLBACK_SERVERS`], in order.
    pub fn fallbacks() -> Vec<WhoisServer> {
        FALLBACK_SERVERS.iter().map(|host| WhoisServer::new(*host)).collect()
    }

    async fn query(&self, target: &Target) -> Result<String, ProbeError> {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let mut stream = match tokio::time::timeout(CONNECT_TIMEOUT, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(ProbeError::failure(&self.host, format!("connect: {e}"))),
            Err(_) => return Err(ProbeError::timeout(&self.host, CONNECT_TIMEOUT)),
        };

        stream
            .write_all(format!("{target}\r\n").as_bytes())
            .await
            .map_err(|e| ProbeError::failure(&self.host, format!("write: {e}")))?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .await
            .map_err(|e| ProbeError::failure(&self.host, format!("read: {e}")))?;
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

#[async_trait]
impl Probe for WhoisServer {
    fn name(&self) -> &str {
        &self.host
    }

    fn describe(&self, target: &Target) -> String {
        format!("tcp {}:{} <- {target}", self.host, self.port)
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = match tokio::time::timeout(timeout, self.query(target)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::timeout(&self.host, timeout)),
        };
        ProbeOutcome::from_result(self.host.as_str(), result, started.elapsed())
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
