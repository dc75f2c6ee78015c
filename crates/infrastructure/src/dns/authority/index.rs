use super::DomainTrie;
use arc_swap::ArcSwap;
use nexns_application::ports::DomainStore;
use nexns_domain::domain_name::normalize;
use nexns_domain::{DomainData, DomainError};
use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// The shared, read-mostly domain index.
///
/// Readers take a lock-free snapshot of the whole trie. Writers build the
/// next trie off to the side and publish it with a single pointer swap, so
/// a query never observes a half-linked trie. Incremental writers are
/// serialized among themselves by `write_lock`.
pub struct DomainIndex {
    trie: ArcSwap<DomainTrie>,
    write_lock: Mutex<()>,
}

impl DomainIndex {
    pub fn new() -> Self {
        Self {
            trie: ArcSwap::from_pointee(DomainTrie::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_datasets(datasets: Vec<DomainData>) -> Result<Self, DomainError> {
        Ok(Self {
            trie: ArcSwap::from_pointee(DomainTrie::build(datasets)?),
            write_lock: Mutex::new(()),
        })
    }

    /// The trie as of now; one query should resolve against one snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<DomainTrie> {
        self.trie.load_full()
    }

    pub fn search(&self, name: &str) -> Option<Arc<DomainData>> {
        let name = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        };
        self.trie.load().search(&name).cloned()
    }

    pub fn insert(&self, data: DomainData) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = DomainTrie::clone(&self.trie.load());
        let name = normalize(data.name());
        let replaced = next.insert(data)?.is_some();
        self.trie.store(Arc::new(next));
        debug!(domain = %name, replaced, "Domain dataset stored");
        Ok(())
    }

    pub fn delete(&self, name: &str) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = DomainTrie::clone(&self.trie.load());
        if next.delete(name).is_none() {
            return false;
        }
        self.trie.store(Arc::new(next));
        debug!(domain = %name, "Domain dataset removed");
        true
    }
}

impl Default for DomainIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainStore for DomainIndex {
    fn replace_all(&self, datasets: Vec<DomainData>) -> Result<usize, DomainError> {
        let next = DomainTrie::build(datasets)?;
        let count = next.len();

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.trie.store(Arc::new(next));
        info!(domains = count, "Domain index replaced");
        Ok(count)
    }

    fn upsert(&self, dataset: DomainData) -> Result<(), DomainError> {
        self.insert(dataset)
    }

    fn remove(&self, name: &str) -> bool {
        self.delete(name)
    }

    fn name_for_id(&self, domain_id: i64) -> Option<String> {
        self.trie
            .load()
            .datasets()
            .into_iter()
            .find(|data| data.domain.id == domain_id)
            .map(|data| data.name().to_string())
    }

    fn len(&self) -> usize {
        self.trie.load().len()
    }
}
