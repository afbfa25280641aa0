use std::sync::Arc;
use std::time::Duration;

use reckon_common::config::Config;
use reckon_common::models::{Entity, WhoisRecord};
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use reckon_plugins::{WhoisCli, WhoisServer};
use reckon_protocols::WhoisFields;
use serde::Serialize;
use tracing::{info_span, warn, Instrument};

use crate::aggregate::Phase;
use crate::chain::FallbackChain;
use crate::operations::single;

/// Per-server budget for the raw port-43 fallbacks.
pub const SERVER_TIMEOUT: Duration = Duration::from_secs(10);

pub const EMPTY_RESPONSE: &str = "empty response from all whois sources";

#[derive(Debug, Clone, Serialize)]
pub struct WhoisReport {
    #[serde(flatten)]
    pub record: WhoisRecord,
    /// The source the record came from.
    pub source: Option<String>,
    pub status: Phase,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTrace>,
}

/// Registration lookup: local client first, then well-known servers in order.
pub struct WhoisService {
    chain: FallbackChain<WhoisRecord>,
}

impl WhoisService {
    pub fn new(chain: FallbackChain<WhoisRecord>) -> Self {
        Self { chain }
    }

    pub fn from_config(_config: &Config) -> Self {
        let fields = Arc::new(WhoisFields);
        let mut chain = FallbackChain::new("whois").link(Arc::new(WhoisCli::new()), fields.clone());
        for server in WhoisServer::fallbacks() {
            chain = chain.link_with_timeout(Arc::new(server), fields.clone(), SERVER_TIMEOUT);
        }
        Self::new(chain)
    }

    pub async fn run(&self, target: &Target, config: &Config) -> WhoisReport {
        let result = single(&self.chain, target, config, "records")
            .instrument(info_span!("whois", indicatif.pb_show = true))
            .await
            .complete();

        let record = result.entities().first().cloned();
        let source = record
            .as_ref()
            .and_then(|r| result.sources_of(&r.key()).first().map(|s| s.to_string()));
        if record.is_none() {
            warn!("No WHOIS source returned a usable record.");
        }

        WhoisReport {
            error: record.is_none().then(|| EMPTY_RESPONSE.to_string()),
            record: record.unwrap_or_else(|| WhoisRecord::new(target.as_str())),
            source,
            status: result.phase(),
            timestamp: result.timestamp_rfc3339(),
            debug: result.trace().clone().finish(),
        }
    }
}
