use nexns_domain::{DomainData, DomainError};

/// The in-memory index the query path reads from.
///
/// Implementations synchronize internally; every mutation is atomic with
/// respect to concurrent readers.
pub trait DomainStore: Send + Sync {
    /// Swaps the whole index for one built from `datasets`.
    fn replace_all(&self, datasets: Vec<DomainData>) -> Result<usize, DomainError>;

    /// Inserts or replaces a single dataset, keyed by its domain name.
    fn upsert(&self, dataset: DomainData) -> Result<(), DomainError>;

    /// Exact-name removal. Returns whether a dataset was removed.
    fn remove(&self, name: &str) -> bool;

    fn name_for_id(&self, domain_id: i64) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
