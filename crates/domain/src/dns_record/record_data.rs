use super::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A stored record payload parsed according to its set's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// Raw text; split into character-strings when synthesized.
    Txt(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    Cname(String),
    Ns(String),
    /// The apex SOA is derived from the domain metadata, so stored SOA
    /// records carry nothing of their own.
    Soa,
    Unrecognized,
}

impl RecordData {
    pub fn parse(record_type: &RecordType, payload: &str) -> Result<Self, String> {
        match record_type {
            RecordType::A => payload
                .trim()
                .parse::<Ipv4Addr>()
                .map(RecordData::A)
                .map_err(|_| format!("'{}' is not an IPv4 address", payload)),
            RecordType::AAAA => payload
                .trim()
                .parse::<Ipv6Addr>()
                .map(RecordData::Aaaa)
                .map_err(|_| format!("'{}' is not an IPv6 address", payload)),
            RecordType::TXT => Ok(RecordData::Txt(payload.to_string())),
            RecordType::MX => Self::parse_mx(payload),
            RecordType::CNAME => Self::parse_target(payload).map(RecordData::Cname),
            RecordType::NS => Self::parse_target(payload).map(RecordData::Ns),
            RecordType::SOA => Ok(RecordData::Soa),
            RecordType::Unknown(_) => Ok(RecordData::Unrecognized),
        }
    }

    fn parse_mx(payload: &str) -> Result<Self, String> {
        let mut parts = payload.split_whitespace();
        let (Some(preference), Some(exchange), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!(
                "'{}' is not of the form \"<preference> <hostname>\"",
                payload
            ));
        };

        let preference = preference
            .parse::<u16>()
            .map_err(|_| format!("MX preference '{}' is not a 16-bit integer", preference))?;

        Ok(RecordData::Mx {
            preference,
            exchange: exchange.to_string(),
        })
    }

    fn parse_target(payload: &str) -> Result<String, String> {
        let target = payload.trim();
        if target.is_empty() || target.contains(char::is_whitespace) {
            return Err(format!("'{}' is not a hostname", payload));
        }
        Ok(target.to_string())
    }
}
