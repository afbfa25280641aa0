use std::sync::Arc;

use reckon_common::config::{Config, Mode};
use reckon_common::models::Hostname;
use reckon_common::target::Target;
use reckon_plugins::Amass;
use reckon_protocols::HostnameLines;
use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::aggregate::AggregatedResult;
use crate::chain::FallbackChain;
use crate::indicators::{indicator_hosts, INDICATOR_SOURCE};
use crate::operations::single;

#[derive(Debug, Clone, Serialize)]
pub struct AmassReport {
    #[serde(flatten)]
    pub result: AggregatedResult<Hostname>,
    pub mode: Mode,
    pub command: String,
}

/// Amass enumeration with the indicator hosts as a last resort.
pub struct AmassService {
    chain: FallbackChain<Hostname>,
    mode: Mode,
}

impl AmassService {
    /// `chain` should not carry its own last resort; the indicator fallback is appended here.
    pub fn new(chain: FallbackChain<Hostname>, mode: Mode) -> Self {
        Self {
            chain: chain.with_last_resort(INDICATOR_SOURCE, indicator_hosts),
            mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let amass = Amass::new(config.mode, config.wordlist.clone(), config.timeout);
        let chain = FallbackChain::new("amass").link(Arc::new(amass), Arc::new(HostnameLines));
        Self::new(chain, config.mode)
    }

    pub async fn run(&self, target: &Target, config: &Config) -> AmassReport {
        let command = self.chain.describe_primary(target).unwrap_or_default();
        let result = single(&self.chain, target, config, "subdomains")
            .instrument(info_span!("amass", indicatif.pb_show = true))
            .await;
        AmassReport {
            result: result.complete(),
            mode: self.mode,
            command,
        }
    }
}
