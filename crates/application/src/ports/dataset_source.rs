use async_trait::async_trait;
use nexns_domain::{DomainData, DomainError};

/// Where authoritative datasets are fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<DomainData>, DomainError>;

    async fn fetch_domain(&self, domain_id: i64) -> Result<DomainData, DomainError>;
}
