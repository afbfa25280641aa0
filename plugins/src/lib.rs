//! # Reckon Plugins
//!
//! Concrete implementations of the outbound ports for the external tools reckon wraps.
//!
//! Command-line tools go through [`process::ExternalTool`]; HTTP sources use `reqwest`
//! directly; WHOIS servers are queried over raw TCP. Every probe turns its own failures
//! into a [`ProbeOutcome`](reckon_common::models::ProbeOutcome), so nothing here returns an
//! error to the engine.
//!
//! | goal | probes |
//! |---|---|
//! | subdomains | [`harvester`], [`reconng`], [`crtsh`], [`amass`] |
//! | registration | [`whois`] |
//! | liveness | [`httpx`], [`http_status`] |
//! | availability | [`fping`], [`hping`], [`nmap`] |
//! | web paths | [`ffuf`] |

pub mod amass;
pub mod crtsh;
pub mod ffuf;
pub mod fping;
pub mod harvester;
pub mod hping;
pub mod http;
pub mod http_status;
pub mod httpx;
pub mod nmap;
pub mod process;
pub mod reconng;
pub mod scratch;
pub mod whois;

pub use amass::Amass;
pub use crtsh::CrtSh;
pub use ffuf::Ffuf;
pub use fping::Fping;
pub use harvester::Harvester;
pub use hping::Hping;
pub use http_status::HttpStatus;
pub use httpx::Httpx;
pub use nmap::Nmap;
pub use reconng::ReconNg;
pub use whois::{WhoisCli, WhoisServer};
