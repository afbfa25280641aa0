use std::sync::Arc;

use anyhow::Context;
use reckon_common::config::Config;
use reckon_common::models::PathHit;
use reckon_common::target::Target;
use reckon_plugins::Ffuf;
use reckon_protocols::FfufLines;
use tracing::{info_span, Instrument};

use crate::aggregate::AggregatedResult;
use crate::chain::FallbackChain;
use crate::operations::single;

/// Web path brute force.
pub struct PathsService {
    chain: FallbackChain<PathHit>,
}

impl PathsService {
    pub fn new(chain: FallbackChain<PathHit>) -> Self {
        Self { chain }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let wordlist = config
            .wordlist
            .clone()
            .context("path brute force needs a wordlist")?;
        let chain = FallbackChain::new("paths").link(Arc::new(Ffuf::new(wordlist)), Arc::new(FfufLines));
        Ok(Self::new(chain))
    }

    pub async fn run(&self, target: &Target, config: &Config) -> AggregatedResult<PathHit> {
        single(&self.chain, target, config, "paths")
            .instrument(info_span!("paths", indicatif.pb_show = true))
            .await
            .complete()
    }
}
