#![allow(dead_code)]
use nexns_domain::{Domain, DomainData, RRSet, Record, RecordType, Zone};

pub struct DomainDataBuilder {
    domain: Domain,
    zones: Vec<Zone>,
}

impl DomainDataBuilder {
    pub fn new(name: &str) -> Self {
        Self {
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
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.domain.id = id;
        self
    }

    pub fn serial(mut self, serial: &str) -> Self {
        self.domain.serial = serial.to_string();
        self
    }

    pub fn zone(mut self, rules: &[&str], rrsets: Vec<RRSet>) -> Self {
        self.zones.push(Zone {
            id: self.zones.len() as i64 + 1,
            name: format!("zone-{}", self.zones.len() + 1),
            rules: rules.iter().map(|r| r.to_string()).collect(),
            rrsets,
        });
        self
    }

    pub fn build(self) -> DomainData {
        DomainData {
            domain: self.domain,
            zones: self.zones,
        }
    }
}

pub fn rrset(name: &str, record_type: RecordType, values: &[&str]) -> RRSet {
    RRSet {
        id: 0,
        name: name.to_string(),
        record_type,
        records: values
            .iter()
            .enumerate()
            .map(|(i, v)| Record {
                id: i as i64,
                ttl: 3600,
                data: v.to_string(),
            })
            .collect(),
    }
}
