use nexns_domain::{DnsRequest, Domain, DomainData, RRSet, Record, RecordType, Zone};
use nexns_infrastructure::dns::{AuthoritativeResolver, DomainIndex};
use std::sync::Arc;

pub struct DatasetBuilder {
    data: DomainData,
}

impl DatasetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            data: DomainData {
                domain: Domain {
                    id: 1,
                    name: name.to_string(),
                    mname: "ns1".to_string(),
                    rname: "hostmaster".to_string(),
                    serial: "2024010101".to_string(),
                    refresh: 3600,
                    retry: 900,
                    expire: 604800,
                    ttl: 300,
                },
                zones: Vec::new(),
            },
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.data.domain.id = id;
        self
    }

    pub fn zone(mut self, name: &str, rules: &[&str], rrsets: Vec<RRSet>) -> Self {
        self.data.zones.push(Zone {
            id: self.data.zones.len() as i64 + 1,
            name: name.to_string(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
            rrsets,
        });
        self
    }

    /// Shorthand for a single zone visible to every IPv4 and IPv6 client.
    pub fn public(self, rrsets: Vec<RRSet>) -> Self {
        self.zone("public", &["0.0.0.0/0", "::/0"], rrsets)
    }

    pub fn build(self) -> DomainData {
        self.data
    }
}

pub fn rrset(name: &str, record_type: RecordType, values: &[&str]) -> RRSet {
    RRSet {
        id: 0,
        name: name.to_string(),
        record_type,
        records: values
            .iter()
            .map(|value| Record {
                id: 0,
                ttl: 60,
                data: value.to_string(),
            })
            .collect(),
    }
}

pub fn resolver_with(datasets: Vec<DomainData>) -> AuthoritativeResolver {
    let index = DomainIndex::from_datasets(datasets).expect("valid datasets");
    AuthoritativeResolver::new(Arc::new(index))
}

pub fn query(name: &str, record_type: RecordType, source: &str) -> DnsRequest {
    DnsRequest::new(name, record_type, source.parse().expect("valid source ip"))
}
