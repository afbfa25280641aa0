//! WHOIS key/value normalization.
//!
//! Every line is split on its first colon; the lower-cased key is classified into one of
//! the [`Field`]s and anything else is ignored. Scalar fields keep the first value seen;
//! name servers and status are sets.

use chrono::{NaiveDate, NaiveDateTime};
use reckon_common::error::ParseFailure;
use reckon_common::models::WhoisRecord;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

/// Tried in order; the first one that parses wins.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%:z",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d/%m/%Y"];
const CANONICAL_DATE: &str = "%Y-%m-%d";

/// Registrar-prefixed keys that describe something other than the registrar itself.
const REGISTRAR_NOISE: &[&str] = &["whois", "url", "iana", "abuse", "email", "phone"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Registrar,
    CreationDate,
    ExpirationDate,
    UpdatedDate,
    NameServer,
    Status,
    Dnssec,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhoisFields;

impl Normalizer for WhoisFields {
    type Entity = WhoisRecord;

    /// Yields at most one record, and none when nothing was classified.
    fn parse(&self, raw: &str, target: &Target, trace: &mut DebugTrace) -> Vec<WhoisRecord> {
        let record = parse_record(raw, target, trace);
        if record.is_empty() {
            Vec::new()
        } else {
            vec![record]
        }
    }
}

pub fn classify(key: &str) -> Option<Field> {
    let any_of = |needles: &[&str]| needles.iter().any(|n| key.contains(n));

    if any_of(&["expir", "expires", "paid-till"]) {
        Some(Field::ExpirationDate)
    } else if any_of(&["creat", "registered on", "registration time"]) {
        Some(Field::CreationDate)
    } else if any_of(&["updated", "modified", "changed"]) {
        Some(Field::UpdatedDate)
    } else if any_of(&["name server", "nserver"]) {
        Some(Field::NameServer)
    } else if key == "status" || key.ends_with(" status") || key.starts_with("status") {
        Some(Field::Status)
    } else if any_of(&["dnssec", "ds data"]) {
        Some(Field::Dnssec)
    } else if key.contains("registrar") && !any_of(REGISTRAR_NOISE) {
        Some(Field::Registrar)
    } else {
        None
    }
}

/// Normalizes a date to `YYYY-MM-DD`, or `None` when no accepted format matches.
pub fn normalize_date(value: &str) -> Option<String> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.format(CANONICAL_DATE).to_string());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date.format(CANONICAL_DATE).to_string());
        }
    }
    None
}

pub fn parse_record(raw: &str, target: &Target, trace: &mut DebugTrace) -> WhoisRecord {
    let mut record = WhoisRecord::new(target.as_str());
    let mut parsed = 0;

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['%', '#']) || line.starts_with(">>>") {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let Some(field) = classify(&key) else {
            continue;
        };
        parsed += 1;

        match field {
            Field::Registrar => set_once(&mut record.registrar, value),
            Field::CreationDate if record.creation_date.is_empty() => {
                record.creation_date = date_or_raw(value, idx + 1, trace);
            }
            Field::ExpirationDate if record.expiration_date.is_empty() => {
                record.expiration_date = date_or_raw(value, idx + 1, trace);
            }
            Field::UpdatedDate if record.updated_date.is_empty() => {
                record.updated_date = date_or_raw(value, idx + 1, trace);
            }
            Field::NameServer if !value.eq_ignore_ascii_case("unsigned") => {
                insert_unique(&mut record.name_servers, value.to_ascii_lowercase());
            }
            Field::Status => insert_unique(&mut record.status, value.to_string()),
            Field::Dnssec => set_once(&mut record.dnssec, value),
            _ => {}
        }
    }

    trace.mark_parsed(parsed);
    record
}

fn date_or_raw(value: &str, line: usize, trace: &mut DebugTrace) -> String {
    match normalize_date(value) {
        Some(date) => date,
        None => {
            let failure = ParseFailure::new(line, format!("unrecognized date '{value}'"));
            trace.record_parse_failure("whois", &failure);
            value.to_string()
        }
    }
}

fn set_once(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

fn insert_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
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

    const VERISIGN: &str = "\
   Domain Name: EXAMPLE.COM
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.iana.org
   Registrar URL: http://res-dom.iana.org
   Updated Date: 2024-08-14T07:01:34Z
   Creation Date: 1995-08-14T04:00:00Z
   Registry Expiry Date: 2025-08-13T04:00:00Z
   Registrar: RESERVED-Internet Assigned Numbers Authority
   Registrar IANA ID: 376
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Name Server: A.IANA-SERVERS.NET
   Name Server: B.IANA-SERVERS.NET
   Name Server: a.iana-servers.net
   DNSSEC: signedDelegation
   DNSSEC DS Data: 370 13 2 BE74359954660069D5C63D200C39F5603827D7DD02B56F120EE9F3A86764247C
>>> Last update of whois database: 2024-09-01T00:00:00Z <<<
";

    fn target() -> Target {
        Target::parse("example.com").unwrap()
    }

    #[test]
    fn normalizes_registry_expiry() {
        let raw = "Registry Expiry Date: 2025-03-01T00:00:00Z";
        let record = parse_record(raw, &target(), &mut DebugTrace::disabled());
        assert_eq!(record.expiration_date, "2025-03-01");
    }

    #[test]
    fn parses_verisign_response() {
        let record = parse_record(VERISIGN, &target(), &mut DebugTrace::disabled());
        assert_eq!(record.domain, "example.com");
        assert_eq!(record.registrar, "RESERVED-Internet Assigned Numbers Authority");
        assert_eq!(record.creation_date, "1995-08-14");
        assert_eq!(record.updated_date, "2024-08-14");
        assert_eq!(record.expiration_date, "2025-08-13");
        assert_eq!(record.name_servers, ["a.iana-servers.net", "b.iana-servers.net"]);
        assert_eq!(record.status.len(), 2);
        assert_eq!(record.dnssec, "signedDelegation");
    }

    #[test]
    fn first_scalar_value_wins() {
        let raw = "Registrar: First Inc\nRegistrar: Second Inc\ncreated: 2001-02-03\ncreated: 1999-01-01\n";
        let record = parse_record(raw, &target(), &mut DebugTrace::disabled());
        assert_eq!(record.registrar, "First Inc");
        assert_eq!(record.creation_date, "2001-02-03");
    }

    #[test]
    fn accepts_every_listed_date_format() {
        assert_eq!(normalize_date("2020-01-02T03:04:05Z").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("2020-01-02 03:04:05").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("2020-01-02").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("02-Jan-2020").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("2020.01.02").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("02/01/2020").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("2020-01-02T03:04:05.123Z").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("2020-01-02T03:04:05+02:00").as_deref(), Some("2020-01-02"));
        assert_eq!(normalize_date("sometime in 2020"), None);
    }

    #[test]
    fn keeps_unparseable_dates_verbatim() {
        let mut trace = DebugTrace::new(true);
        let raw = "Expires On: before the heat death";
        let record = parse_record(raw, &target(), &mut trace);
        assert_eq!(record.expiration_date, "before the heat death");
        assert_eq!(trace.parse_errors().len(), 1);
    }

    #[test]
    fn ignores_unknown_keys_and_empty_values() {
        let raw = "Registrant Country: US\nRegistrar:\nNo match for \"NOPE.COM\".\n";
        let mut trace = DebugTrace::disabled();
        let record = parse_record(raw, &target(), &mut trace);
        assert!(record.is_empty());
        assert!(WhoisFields.parse(raw, &target(), &mut trace).is_empty());
    }

    #[test]
    fn unsigned_is_not_a_name_server() {
        let raw = "nserver: UNSIGNED\nnserver: ns1.example.net\n";
        let record = parse_record(raw, &target(), &mut DebugTrace::disabled());
        assert_eq!(record.name_servers, ["ns1.example.net"]);
    }

    #[test]
    fn classifies_common_keys() {
        assert_eq!(classify("registrar"), Some(Field::Registrar));
        assert_eq!(classify("sponsoring registrar"), Some(Field::Registrar));
        assert_eq!(classify("registrar whois server"), None);
        assert_eq!(classify("registrar registration expiration date"), Some(Field::ExpirationDate));
        assert_eq!(classify("domain status"), Some(Field::Status));
        assert_eq!(classify("dnssec ds data"), Some(Field::Dnssec));
        assert_eq!(classify("last-modified"), Some(Field::UpdatedDate));
        assert_eq!(classify("registrant name"), None);
    }
}
