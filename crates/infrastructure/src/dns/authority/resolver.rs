use super::synthesizer::{synthesize_soa, Synthesized, Synthesizer};
use super::DomainIndex;
use hickory_proto::rr::{RData, Record};
use nexns_domain::domain_name::normalize;
use nexns_domain::{DnsRequest, RecordType};
use std::sync::Arc;
use tracing::debug;

/// Verdict for one question.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No registered domain encloses the name; another handler may answer.
    PassThrough,
    /// The domain is ours but nothing is visible to this client.
    Negative,
    Answer {
        answers: Vec<Record>,
        additionals: Vec<Record>,
    },
}

/// The query-resolution pipeline.
///
/// Lookup, optional SOA, primary answer, one-hop CNAME chase, assemble.
/// Runs synchronously against a single index snapshot.
pub struct AuthoritativeResolver {
    index: Arc<DomainIndex>,
}

impl AuthoritativeResolver {
    pub fn new(index: Arc<DomainIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<DomainIndex> {
        &self.index
    }

    pub fn resolve(&self, request: &DnsRequest) -> Resolution {
        let trie = self.index.snapshot();
        let name = request.name.as_ref();
        let record_type = &request.record_type;

        let Some(data) = trie.search(name) else {
            debug!(name = %name, "No enclosing domain, passing through");
            return Resolution::PassThrough;
        };

        let synthesizer = Synthesizer::new(&trie, request.client_ip);
        let mut result = Synthesized::default();

        if *record_type == RecordType::SOA {
            match synthesize_soa(&data.domain) {
                Ok(soa) => result.answers.push(soa),
                Err(e) => debug!(error = %e, domain = %data.name(), "Cannot synthesize SOA"),
            }
        }

        result.extend(synthesizer.answer_from(data, name, record_type));

        if *record_type != RecordType::CNAME {
            let aliases = synthesizer.answer_from(data, name, &RecordType::CNAME);
            let targets: Vec<String> = aliases.answers.iter().filter_map(alias_target).collect();
            result.extend(aliases);

            // One hop only: the targets' own aliases are not followed.
            for target in targets {
                result.extend(synthesizer.answer(&target, record_type));
            }
        }

        if result.answers.is_empty() {
            debug!(
                name = %name,
                record_type = %record_type,
                client = %request.client_ip,
                "No visible records, answering NXDOMAIN"
            );
            return Resolution::Negative;
        }

        debug!(
            name = %name,
            record_type = %record_type,
            answers = result.answers.len(),
            additionals = result.additionals.len(),
            "Answer assembled"
        );
        Resolution::Answer {
            answers: result.answers,
            additionals: result.additionals,
        }
    }
}

fn alias_target(record: &Record) -> Option<String> {
    match record.data() {
        RData::CNAME(cname) => Some(normalize(&cname.0.to_ascii())),
        _ => None,
    }
}
