//! Normalizers for the textual formats external tools speak.
//!
//! Every normalizer implements [`Normalizer`](reckon_common::ports::Normalizer) and never
//! fails as a whole: lines it does not understand are recorded in the debug trace and
//! skipped.

pub mod crtsh;
pub mod ffuf;
pub mod fping;
pub mod hostnames;
pub mod hping;
pub mod httpx;
pub mod nmap;
pub mod whois;

pub use crtsh::CrtShJson;
pub use ffuf::FfufLines;
pub use fping::FpingSummary;
pub use hostnames::HostnameLines;
pub use hping::HpingSections;
pub use nmap::NmapGrepable;
pub use whois::WhoisFields;
