//! Turns stored RRSets into hickory resource records.

use super::selector::{select_rrset, Selection};
use super::DomainTrie;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, SOA, TXT};
use hickory_proto::rr::{Name, RData, Record};
use nexns_domain::domain_name::{complete_fqdn, normalize};
use nexns_domain::{Domain, DomainData, DomainError, RecordData, RecordType};
use std::net::IpAddr;
use tracing::debug;

/// Longest character-string a TXT record can carry.
pub const MAX_TXT_CHUNK: usize = 255;

#[derive(Debug, Default, Clone)]
pub struct Synthesized {
    pub answers: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Synthesized {
    pub fn extend(&mut self, other: Synthesized) {
        self.answers.extend(other.answers);
        self.additionals.extend(other.additionals);
    }
}

/// Splits `text` into consecutive chunks of at most [`MAX_TXT_CHUNK`] bytes.
pub fn split_txt(text: &str) -> Vec<&[u8]> {
    if text.is_empty() {
        return vec![b"".as_slice()];
    }
    text.as_bytes().chunks(MAX_TXT_CHUNK).collect()
}

pub fn fqdn(name: &str) -> Result<Name, DomainError> {
    let absolute = if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    };
    Name::from_ascii(&absolute)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", absolute, e)))
}

fn target_name(target: &str, apex: &str) -> Result<Name, DomainError> {
    fqdn(&complete_fqdn(target, apex))
}

/// One stored record as a resource record owned by `owner`.
///
/// `Ok(None)` for kinds that synthesize to nothing (stored SOA, unknown
/// types). Payloads that do not parse as their declared type are errors.
pub fn synthesize_record(
    apex: &str,
    owner: &Name,
    record_type: &RecordType,
    ttl: u32,
    payload: &str,
) -> Result<Option<Record>, DomainError> {
    let malformed =
        |reason: String| DomainError::malformed(&owner.to_ascii(), record_type.as_str(), reason);

    let rdata = match RecordData::parse(record_type, payload).map_err(malformed)? {
        RecordData::A(addr) => RData::A(A(addr)),
        RecordData::Aaaa(addr) => RData::AAAA(AAAA(addr)),
        RecordData::Txt(text) => RData::TXT(TXT::from_bytes(split_txt(&text))),
        RecordData::Mx {
            preference,
            exchange,
        } => RData::MX(MX::new(preference, target_name(&exchange, apex)?)),
        RecordData::Cname(target) => RData::CNAME(CNAME(target_name(&target, apex)?)),
        RecordData::Ns(target) => RData::NS(NS(target_name(&target, apex)?)),
        RecordData::Soa | RecordData::Unrecognized => return Ok(None),
    };

    Ok(Some(Record::from_rdata(owner.clone(), ttl, rdata)))
}

/// The apex SOA, built from the domain's metadata alone.
pub fn synthesize_soa(domain: &Domain) -> Result<Record, DomainError> {
    let apex = normalize(&domain.name);
    let owner = fqdn(&apex)?;
    let mname = target_name(&domain.mname, &apex)?;
    let rname = target_name(&domain.rname.replacen('@', ".", 1), &apex)?;
    let serial = domain
        .serial_number()
        .map_err(|reason| DomainError::malformed(&owner.to_ascii(), "SOA", reason))?;

    let soa = SOA::new(
        mname,
        rname,
        serial,
        soa_timer(domain.refresh),
        soa_timer(domain.retry),
        soa_timer(domain.expire),
        domain.ttl,
    );
    Ok(Record::from_rdata(owner, domain.ttl, RData::SOA(soa)))
}

/// SOA timers are 31-bit on the wire; larger values saturate.
fn soa_timer(seconds: u32) -> i32 {
    i32::try_from(seconds).unwrap_or(i32::MAX)
}

/// Selection plus synthesis against one index snapshot and one client.
pub struct Synthesizer<'a> {
    index: &'a DomainTrie,
    source: IpAddr,
}

impl<'a> Synthesizer<'a> {
    pub fn new(index: &'a DomainTrie, source: IpAddr) -> Self {
        Self { index, source }
    }

    /// Records for `name`/`record_type` from an already located dataset.
    pub fn answer_from(
        &self,
        data: &DomainData,
        name: &str,
        record_type: &RecordType,
    ) -> Synthesized {
        match select_rrset(data, name, record_type, self.source) {
            Some(selection) => self.synthesize(&selection, name, true),
            None => Synthesized::default(),
        }
    }

    /// Like [`answer_from`](Self::answer_from), locating the dataset first.
    pub fn answer(&self, name: &str, record_type: &RecordType) -> Synthesized {
        self.lookup(name, record_type, true)
    }

    fn lookup(&self, name: &str, record_type: &RecordType, with_glue: bool) -> Synthesized {
        let Some(data) = self.index.search(name) else {
            return Synthesized::default();
        };
        match select_rrset(data, name, record_type, self.source) {
            Some(selection) => self.synthesize(&selection, name, with_glue),
            None => Synthesized::default(),
        }
    }

    /// Malformed records are logged and skipped; the rest of the set is
    /// still answered.
    fn synthesize(&self, selection: &Selection<'_>, name: &str, with_glue: bool) -> Synthesized {
        let mut out = Synthesized::default();
        let apex = selection.domain.name.as_str();
        let rrset = selection.rrset;

        let owner = match fqdn(name) {
            Ok(owner) => owner,
            Err(e) => {
                debug!(error = %e, "Query name is not representable");
                return out;
            }
        };

        for record in &rrset.records {
            match synthesize_record(apex, &owner, &rrset.record_type, record.ttl, &record.data) {
                Ok(Some(rr)) => out.answers.push(rr),
                Ok(None) => {}
                Err(e) => {
                    debug!(error = %e, zone = %selection.zone.name, "Skipping malformed record")
                }
            }
        }

        if with_glue && rrset.record_type == RecordType::MX {
            let glue = self.glue_for(&out.answers);
            out.additionals.extend(glue);
        }

        out
    }

    /// Address records for each MX exchange, without further glue.
    fn glue_for(&self, mx_records: &[Record]) -> Vec<Record> {
        let mut glue = Vec::new();
        for record in mx_records {
            let RData::MX(mx) = record.data() else {
                continue;
            };
            let exchange = normalize(&mx.exchange().to_ascii());
            for address_type in [RecordType::A, RecordType::AAAA] {
                glue.extend(self.lookup(&exchange, &address_type, false).answers);
            }
        }
        glue
    }
}
