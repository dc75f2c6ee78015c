use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Also answer over TCP on the same port
    #[serde(default = "default_true")]
    pub tcp_enabled: bool,

    /// Largest UDP response sent before falling back to a truncated reply
    #[serde(default = "default_udp_payload_limit")]
    pub udp_payload_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            tcp_enabled: true,
            udp_payload_limit: default_udp_payload_limit(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_true() -> bool {
    true
}

fn default_udp_payload_limit() -> usize {
    512
}
