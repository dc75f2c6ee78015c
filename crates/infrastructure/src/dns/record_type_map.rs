//! Question types from the wire mapped onto `nexns_domain::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use nexns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Every question type maps to something; types the engine cannot
    /// synthesize come back as `RecordType::Unknown` and simply never match
    /// a known RRSet.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::SOA => RecordType::SOA,
            other => RecordType::from(other.to_string()),
        }
    }
}
