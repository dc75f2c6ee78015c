use super::RecordType;
use crate::domain_name::normalize;
use std::net::IpAddr;
use std::sync::Arc;

/// One question as seen by the resolution pipeline.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
}

impl DnsRequest {
    /// Normalizes the name and unwraps IPv4-mapped IPv6 sources so that
    /// IPv4 ACL rules still apply to them.
    pub fn new(name: &str, record_type: RecordType, client_ip: IpAddr) -> Self {
        let client_ip = match client_ip {
            IpAddr::V6(v6) => v6
                .to_ipv4_mapped()
                .map(IpAddr::V4)
                .unwrap_or(IpAddr::V6(v6)),
            v4 => v4,
        };

        Self {
            name: Arc::from(normalize(name)),
            record_type,
            client_ip,
        }
    }
}
