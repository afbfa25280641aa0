//! Batch liveness output from httpx (`-sc -nc -silent`).
//!
//! Each line looks like `https://api.example.com [200]`; redirect chains print several
//! codes (`[301,200]`) and the first one is the status of the probed URL.

use reckon_common::ports::LiveHost;

pub fn parse_line(line: &str) -> Option<LiveHost> {
    let mut tokens = line.split_whitespace();
    let url = tokens.next()?;
    let host = host_of(url)?;

    let status = tokens
        .find(|t| t.starts_with('['))
        .and_then(|t| t.trim_matches(['[', ']']).split(',').next())
        .and_then(|code| code.trim().parse::<u16>().ok());

    Some(LiveHost { host, status })
}

pub fn parse(raw: &str) -> Vec<LiveHost> {
    raw.lines().filter_map(parse_line).collect()
}

/// Strips scheme, default port, path and trailing dot from a URL.
fn host_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    };
    let host = host.trim_end_matches('.');
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
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

    #[test]
    fn reads_url_and_code() {
        let live = parse_line("https://api.example.com [200]").unwrap();
        assert_eq!(live.host, "api.example.com");
        assert_eq!(live.status, Some(200));
    }

    #[test]
    fn first_code_of_a_redirect_chain_wins() {
        let live = parse_line("http://WWW.example.com:8080/login [301,200]").unwrap();
        assert_eq!(live.host, "www.example.com");
        assert_eq!(live.status, Some(301));
    }

    #[test]
    fn bare_host_without_code() {
        let live = parse_line("cdn.example.com/").unwrap();
        assert_eq!(live.host, "cdn.example.com");
        assert_eq!(live.status, None);
    }

    #[test]
    fn skips_blank_lines() {
        let hosts = parse("\n  \nhttps://a.example.com [403]\n");
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].status, Some(403));
    }
}
