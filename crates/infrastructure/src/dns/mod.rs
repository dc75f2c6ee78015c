pub mod authority;
pub mod record_type_map;
pub mod server;

pub use authority::{AuthoritativeResolver, DomainIndex, DomainTrie, Resolution};
pub use record_type_map::RecordTypeMapper;
pub use server::DnsServerHandler;
