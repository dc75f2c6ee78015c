use nexns_domain::Config;
use nexns_infrastructure::dns::{AuthoritativeResolver, DnsServerHandler, DomainIndex};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub index: Arc<DomainIndex>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Starts with an empty index; the initial sync fills it.
    pub fn new(config: &Config) -> Self {
        let index = Arc::new(DomainIndex::new());
        let resolver = Arc::new(AuthoritativeResolver::new(index.clone()));
        let handler =
            DnsServerHandler::new(resolver).with_udp_payload_limit(config.server.udp_payload_limit);

        info!(
            udp_payload_limit = config.server.udp_payload_limit,
            "Authoritative DNS services initialized"
        );

        Self { index, handler }
    }
}
