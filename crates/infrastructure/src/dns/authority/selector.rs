//! ACL-driven zone and RRSet selection.
//!
//! Zones are tried in declaration order. A zone applies to a client when the
//! first of its rules that contains the source address is found; rules are
//! never ranked by prefix length, so operators list the most specific zone
//! first.

use ipnetwork::IpNetwork;
use nexns_domain::domain_name::relative_name;
use nexns_domain::{Domain, DomainData, RRSet, RecordType, Zone};
use std::net::IpAddr;
use tracing::debug;

/// The RRSet chosen for one (name, type, source) triple.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub domain: &'a Domain,
    pub zone: &'a Zone,
    pub rrset: &'a RRSet,
}

pub fn zone_admits(zone: &Zone, source: IpAddr) -> bool {
    zone.rules.iter().any(|rule| match rule.trim().parse::<IpNetwork>() {
        Ok(network) => network.contains(source),
        Err(_) => {
            debug!(zone = %zone.name, rule = %rule, "Skipping unparseable ACL rule");
            false
        }
    })
}

/// Finds the RRSet for `name`/`record_type` visible to `source`.
///
/// Returns `None` when `name` is not inside the dataset's domain, when no
/// applicable zone holds a matching set, or when the first matching set has
/// no records. An empty match ends the search instead of consulting later
/// zones.
pub fn select_rrset<'a>(
    data: &'a DomainData,
    name: &str,
    record_type: &RecordType,
    source: IpAddr,
) -> Option<Selection<'a>> {
    let Some(relative) = relative_name(name, data.name()) else {
        debug!(name = %name, domain = %data.name(), "Name is outside the matched domain");
        return None;
    };

    for zone in data.zones.iter().filter(|zone| zone_admits(zone, source)) {
        let found = zone
            .rrsets
            .iter()
            .find(|rrset| rrset.name == relative && rrset.record_type == *record_type);

        if let Some(rrset) = found {
            if rrset.records.is_empty() {
                return None;
            }
            return Some(Selection {
                domain: &data.domain,
                zone,
                rrset,
            });
        }
    }

    None
}
