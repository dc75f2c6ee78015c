use nexns_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::UpdateGate;
use crate::ports::{DatasetSource, DomainStore};
use crate::services::prepare_dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub loaded: usize,
    pub rejected: usize,
}

/// Pulls the full dump and atomically replaces the index with it.
///
/// A failed fetch leaves the current index untouched.
pub struct SyncAllDomainsUseCase {
    source: Arc<dyn DatasetSource>,
    store: Arc<dyn DomainStore>,
    gate: UpdateGate,
}

impl SyncAllDomainsUseCase {
    pub fn new(source: Arc<dyn DatasetSource>, store: Arc<dyn DomainStore>) -> Self {
        Self {
            source,
            store,
            gate: UpdateGate::new(),
        }
    }

    pub fn with_update_gate(mut self, gate: UpdateGate) -> Self {
        self.gate = gate;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<SyncSummary, DomainError> {
        let _gate = self.gate.enter().await;
        info!("Pulling all domain datasets");

        let datasets = self.source.fetch_all().await?;
        let fetched = datasets.len();

        let mut prepared = Vec::with_capacity(fetched);
        for data in datasets {
            let name = data.domain.name.clone();
            match prepare_dataset(data) {
                Ok(data) => prepared.push(data),
                Err(e) => warn!(domain = %name, error = %e, "Dataset rejected"),
            }
        }

        let rejected = fetched - prepared.len();
        let loaded = self.store.replace_all(prepared)?;

        info!(loaded, rejected, "Domain datasets loaded");

        Ok(SyncSummary { loaded, rejected })
    }
}
