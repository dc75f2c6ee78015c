//! Authoritative resolution engine.
//!
//! Query flow: [`DomainIndex`] finds the closest enclosing domain, the
//! selector picks the RRSet visible to the client, the synthesizer turns it
//! into hickory records and [`AuthoritativeResolver`] assembles the verdict.

mod domain_trie;
mod index;
mod resolver;
pub mod selector;
pub mod synthesizer;

pub use domain_trie::DomainTrie;
pub use index::DomainIndex;
pub use resolver::{AuthoritativeResolver, Resolution};
pub use selector::{select_rrset, Selection};
pub use synthesizer::{
    split_txt, synthesize_record, synthesize_soa, Synthesized, Synthesizer, MAX_TXT_CHUNK,
};
