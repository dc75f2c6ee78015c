use compact_str::CompactString;
use nexns_domain::domain_name::normalize;
use nexns_domain::{DomainData, DomainError};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    data: Option<Arc<DomainData>>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: HashMap::with_hasher(FxBuildHasher),
            data: None,
        }
    }

    fn is_prunable(&self) -> bool {
        self.children.is_empty() && self.data.is_none()
    }

    /// Every node below the root either holds data or leads to one that does.
    fn is_well_formed(&self) -> bool {
        !self.is_prunable() && self.children.values().all(TrieNode::is_well_formed)
    }
}

/// Domain datasets keyed by their label sequence, most significant label
/// first ("com" → "example" → "sub").
///
/// Cloning is a deep copy; the datasets themselves are shared.
#[derive(Default, Clone)]
pub struct DomainTrie {
    root: TrieNode,
    len: usize,
}

#[inline]
fn reversed_labels(name: &str) -> SmallVec<[&str; 8]> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        return SmallVec::new();
    }
    name.split('.').rev().collect()
}

impl DomainTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Equivalent to inserting every dataset in order; later duplicates win.
    pub fn build<I>(datasets: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = DomainData>,
    {
        let mut trie = Self::new();
        for data in datasets {
            trie.insert(data)?;
        }
        Ok(trie)
    }

    /// Stores `data` under its domain name, returning the dataset it replaced.
    ///
    /// The dataset is brought into at-rest form first, so the stored names
    /// match what the selector compares against.
    pub fn insert(&mut self, mut data: DomainData) -> Result<Option<Arc<DomainData>>, DomainError> {
        data.normalize()?;

        let mut node = &mut self.root;
        for label in reversed_labels(data.name()) {
            node = node.children.entry(CompactString::new(label)).or_default();
        }

        let previous = node.data.replace(Arc::new(data));
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Closest enclosing domain of `name`.
    ///
    /// Walks from the top-level label down. When the walk dead-ends before
    /// the name is consumed, the deepest dataset seen on the path wins. When
    /// every label matched, only the final node's own dataset counts.
    /// Names are expected in lower case.
    pub fn search(&self, name: &str) -> Option<&Arc<DomainData>> {
        let mut node = &self.root;
        let mut closest = None;

        for label in reversed_labels(name) {
            let Some(child) = node.children.get(label) else {
                return closest;
            };
            node = child;
            if let Some(data) = &node.data {
                closest = Some(data);
            }
        }

        node.data.as_ref()
    }

    /// Exact-name removal; empty branches left behind are pruned.
    pub fn delete(&mut self, name: &str) -> Option<Arc<DomainData>> {
        let name = normalize(name);
        let labels = reversed_labels(&name);
        if labels.is_empty() {
            return None;
        }

        let removed = Self::remove_at(&mut self.root, &labels);
        if removed.is_some() {
            self.len -= 1;
        }
        debug_assert!(
            self.root.children.values().all(TrieNode::is_well_formed),
            "domain trie holds a dead branch after deleting {}",
            name
        );
        removed
    }

    fn remove_at(node: &mut TrieNode, labels: &[&str]) -> Option<Arc<DomainData>> {
        let Some((label, rest)) = labels.split_first() else {
            return node.data.take();
        };

        let child = node.children.get_mut(*label)?;
        let removed = Self::remove_at(child, rest);
        if removed.is_some() && child.is_prunable() {
            node.children.remove(*label);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn datasets(&self) -> Vec<&Arc<DomainData>> {
        let mut found = Vec::with_capacity(self.len);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let Some(data) = &node.data {
                found.push(data);
            }
            stack.extend(node.children.values());
        }
        found
    }
}
