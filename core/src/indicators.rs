use reckon_common::models::Hostname;
use reckon_common::target::Target;

/// Provenance label of hosts produced by [`indicator_hosts`].
pub const INDICATOR_SOURCE: &str = "indicator-fallback";

/// Host prefixes common enough to report when enumeration finds nothing at all.
pub const INDICATOR_PREFIXES: [&str; 12] = [
    "www", "mail", "api", "admin", "portal", "secure", "cdn", "static", "app", "dev", "staging",
    "test",
];

pub fn indicator_hosts(target: &Target) -> Vec<Hostname> {
    INDICATOR_PREFIXES
        .iter()
        .map(|prefix| Hostname::new(format!("{prefix}.{target}")))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
