use nexns_domain::{validate_dataset, DomainData, DomainError};
use tracing::warn;

/// Logs data-quality issues and brings a fetched dataset into at-rest form.
///
/// Issues inside records or ACL rules are only reported; the affected
/// entries are skipped again at query time. An unusable domain name
/// rejects the whole dataset.
pub fn prepare_dataset(mut data: DomainData) -> Result<DomainData, DomainError> {
    for issue in validate_dataset(&data) {
        warn!(
            domain = %data.domain.name,
            domain_id = data.domain.id,
            issue = %issue,
            "Dataset issue"
        );
    }

    data.normalize()?;
    Ok(data)
}
