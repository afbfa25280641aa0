use serde::Serialize;

use crate::models::entity::Entity;

/// The fields of a WHOIS response that are worth keeping.
///
/// Dates are `YYYY-MM-DD` when they could be parsed and the verbatim value otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WhoisRecord {
    pub domain: String,
    pub registrar: String,
    pub creation_date: String,
    pub expiration_date: String,
    pub updated_date: String,
    pub name_servers: Vec<String>,
    pub status: Vec<String>,
    pub dnssec: String,
}

impl WhoisRecord {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// True when no field besides the domain was filled in.
    pub fn is_empty(&self) -> bool {
        self.registrar.is_empty()
            && self.creation_date.is_empty()
            && self.expiration_date.is_empty()
            && self.updated_date.is_empty()
            && self.name_servers.is_empty()
            && self.status.is_empty()
            && self.dnssec.is_empty()
    }
}

impl Entity for WhoisRecord {
    fn key(&self) -> String {
        self.domain.to_ascii_lowercase()
    }
}
