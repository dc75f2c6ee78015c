use nexns_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::{DatasetSource, DomainStore};
use crate::services::prepare_dataset;

pub struct RefreshDomainUseCase {
    source: Arc<dyn DatasetSource>,
    store: Arc<dyn DomainStore>,
}

impl RefreshDomainUseCase {
    pub fn new(source: Arc<dyn DatasetSource>, store: Arc<dyn DomainStore>) -> Self {
        Self { source, store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain_id: i64) -> Result<(), DomainError> {
        info!(domain_id, "Loading domain dataset");

        let data = prepare_dataset(self.source.fetch_domain(domain_id).await?)?;

        // A rename leaves the dataset reachable under its old name otherwise.
        if let Some(previous) = self.store.name_for_id(domain_id) {
            if previous != data.domain.name {
                self.store.remove(&previous);
                info!(domain_id, old = %previous, new = %data.domain.name, "Domain renamed");
            }
        }

        let name = data.domain.name.clone();
        self.store.upsert(data)?;

        info!(domain_id, domain = %name, "Domain dataset loaded");
        Ok(())
    }
}
