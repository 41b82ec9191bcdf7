use std::collections::HashMap;

use ego_tree::NodeId;

/// Pre-cleaning content of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub element: NodeId,
    pub html: String,
    pub captured_at_ms: u64,
}

/// Identity-keyed backups, iterated in capture order.
///
/// An entry exists iff its element was cleaned and not restored since.
#[derive(Debug, Default)]
pub struct BackupStore {
    entries: HashMap<NodeId, BackupEntry>,
    order: Vec<NodeId>,
}

impl BackupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, element: NodeId) -> bool {
        self.entries.contains_key(&element)
    }

    /// Returns false and keeps the existing entry if the element is already tracked.
    pub fn insert(&mut self, entry: BackupEntry) -> bool {
        if self.contains(entry.element) {
            return false;
        }
        self.order.push(entry.element);
        self.entries.insert(entry.element, entry);
        true
    }

    pub fn get(&self, element: NodeId) -> Option<&BackupEntry> {
        self.entries.get(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackupEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
