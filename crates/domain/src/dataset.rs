use crate::dns_record::{RecordData, RecordType};
use crate::domain_name::{complete_fqdn, normalize, validate_domain_name};
use crate::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A domain's full configuration: SOA metadata plus its ordered zones.
///
/// This is the unit of atomic load, replacement and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainData {
    pub domain: Domain,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "domain")]
    pub name: String,
    #[serde(default)]
    pub mname: String,
    #[serde(default)]
    pub rname: String,
    #[serde(default, deserialize_with = "deserialize_serial")]
    pub serial: String,
    #[serde(default)]
    pub refresh: u32,
    #[serde(default)]
    pub retry: u32,
    #[serde(default)]
    pub expire: u32,
    /// Minimum TTL of the SOA record.
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub rrsets: Vec<RRSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSet {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, alias = "val")]
    pub data: String,
}

fn deserialize_serial<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Serial {
        Text(String),
        Number(u64),
    }

    Ok(match Serial::deserialize(deserializer)? {
        Serial::Text(text) => text,
        Serial::Number(number) => number.to_string(),
    })
}

impl Domain {
    pub fn serial_number(&self) -> Result<u32, String> {
        let serial = self.serial.trim();
        if serial.is_empty() {
            return Ok(0);
        }
        serial
            .parse::<u32>()
            .map_err(|_| format!("serial '{}' is not a 32-bit unsigned integer", self.serial))
    }
}

impl RRSet {
    /// Owner name of this set's records, fully qualified.
    pub fn owner(&self, apex: &str) -> String {
        complete_fqdn(&self.name, apex)
    }
}

impl DomainData {
    pub fn name(&self) -> &str {
        &self.domain.name
    }

    /// Brings names into their at-rest form and rejects an unusable apex.
    ///
    /// Relative RRSet names are lower-cased and stripped of trailing dots so
    /// that the selector can compare them against normalized query names.
    pub fn normalize(&mut self) -> Result<(), DomainError> {
        self.domain.name = normalize(&self.domain.name);
        validate_domain_name(&self.domain.name)?;

        for zone in &mut self.zones {
            for rrset in &mut zone.rrsets {
                rrset.name = normalize(&rrset.name);
            }
        }
        Ok(())
    }
}

/// A data-quality problem found while loading a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    InvalidDomainName(String),
    InvalidSerial(String),
    InvalidAclRule {
        zone: String,
        rule: String,
    },
    MalformedRecord {
        owner: String,
        record_type: String,
        reason: String,
    },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetIssue::InvalidDomainName(reason) => write!(f, "invalid domain name: {}", reason),
            DatasetIssue::InvalidSerial(reason) => write!(f, "invalid SOA {}", reason),
            DatasetIssue::InvalidAclRule { zone, rule } => {
                write!(f, "zone '{}' has unparseable ACL rule '{}'", zone, rule)
            }
            DatasetIssue::MalformedRecord {
                owner,
                record_type,
                reason,
            } => write!(f, "malformed {} record at {}: {}", record_type, owner, reason),
        }
    }
}

/// Collects every data-quality issue in a dataset without rejecting it.
pub fn validate_dataset(data: &DomainData) -> Vec<DatasetIssue> {
    let mut issues = Vec::new();
    let apex = normalize(&data.domain.name);

    if let Err(e) = validate_domain_name(&apex) {
        issues.push(DatasetIssue::InvalidDomainName(e.to_string()));
    }
    if let Err(reason) = data.domain.serial_number() {
        issues.push(DatasetIssue::InvalidSerial(reason));
    }

    for zone in &data.zones {
        for rule in &zone.rules {
            if rule.trim().parse::<ipnetwork::IpNetwork>().is_err() {
                issues.push(DatasetIssue::InvalidAclRule {
                    zone: zone.name.clone(),
                    rule: rule.clone(),
                });
            }
        }

        for rrset in &zone.rrsets {
            for record in &rrset.records {
                if let Err(reason) = RecordData::parse(&rrset.record_type, &record.data) {
                    issues.push(DatasetIssue::MalformedRecord {
                        owner: rrset.owner(&apex),
                        record_type: rrset.record_type.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    issues
}
