pub mod amass;
pub mod paths;
pub mod preengagement;
pub mod recon;
pub mod whois;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use reckon_common::config::{Config, Mode, StatusCodes, DEFAULT_CODES};
use reckon_common::target::Target;

#[derive(Parser)]
#[command(name = "reckon")]
#[command(version, about = "Subdomain and surface reconnaissance aggregator.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate live subdomains from several sources
    #[command(alias = "r")]
    Recon {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mode: ModeArgs,
        /// Status codes that count a host as alive
        #[arg(short = 'c', long, default_value = DEFAULT_CODES)]
        codes: StatusCodes,
        /// Outer deadline in seconds
        #[arg(short, long, default_value_t = 300)]
        timeout: u64,
    },
    /// Enumerate subdomains with amass
    #[command(alias = "am")]
    Amass {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mode: ModeArgs,
        /// Wordlist for active brute forcing
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
        #[arg(short, long, default_value_t = 300)]
        timeout: u64,
    },
    /// Look up domain registration data
    #[command(alias = "w")]
    Whois {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(short, long, default_value_t = 30)]
        timeout: u64,
    },
    /// Check reachability, firewall behavior and common ports
    #[command(alias = "pre")]
    Preengagement {
        #[arg(short = 'd', long = "target")]
        target: Target,
        #[arg(long)]
        debug: bool,
        #[arg(short, long, default_value_t = 30)]
        timeout: u64,
    },
    /// Brute force web paths with ffuf
    #[command(alias = "fuff")]
    Paths {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(short, long)]
        wordlist: PathBuf,
        #[arg(short, long, default_value_t = 300)]
        timeout: u64,
    },
}

#[derive(Args)]
pub struct CommonArgs {
    /// Target domain
    #[arg(short = 'd', long = "domain")]
    pub target: Target,
    /// Attach raw tool output and parse errors to the result
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// Passive sources only (default)
    #[arg(short, long)]
    pub passive: bool,
    /// Include active probing and brute forcing
    #[arg(short, long)]
    pub active: bool,
}

impl ModeArgs {
    pub fn mode(&self) -> Mode {
        if self.active { Mode::Active } else { Mode::Passive }
    }
}

/// Writes the result document to stdout. Nothing else goes there.
pub fn emit<T: Serialize>(document: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(document).context("failed to serialize the result")?;
    println!("{json}");
    Ok(())
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// The target and the configuration this invocation runs with.
    pub fn resolve(&self) -> (Target, Config) {
        let base = Config::default();
        match self {
            Commands::Recon { common, mode, codes, timeout } => (
                common.target.clone(),
                Config {
                    debug: common.debug,
                    mode: mode.mode(),
                    timeout: Duration::from_secs(*timeout),
                    accepted_codes: codes.clone(),
                    ..base
                },
            ),
            Commands::Amass { common, mode, wordlist, timeout } => (
                common.target.clone(),
                Config {
                    debug: common.debug,
                    mode: mode.mode(),
                    timeout: Duration::from_secs(*timeout),
                    wordlist: wordlist.clone(),
                    ..base
                },
            ),
            Commands::Whois { common, timeout } => (
                common.target.clone(),
                Config {
                    debug: common.debug,
                    timeout: Duration::from_secs(*timeout),
                    ..base
                },
            ),
            Commands::Preengagement { target, debug, timeout } => (
                target.clone(),
                Config {
                    debug: *debug,
                    timeout: Duration::from_secs(*timeout),
                    ..base
                },
            ),
            Commands::Paths { common, wordlist, timeout } => (
                common.target.clone(),
                Config {
                    debug: common.debug,
                    timeout: Duration::from_secs(*timeout),
                    wordlist: Some(wordlist.clone()),
                    ..base
                },
            ),
        }
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
