//! Pending region tables between preprocess and postprocess.

use std::sync::Arc;

use dashmap::DashMap;

use super::region::RegionTable;

/// Thread-safe storage for region tables, keyed by document identifier.
///
/// A table is inserted by preprocess and taken exactly once by postprocess.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<String, Arc<RegionTable>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Store the region table for a document, replacing any pending one.
    pub fn insert(&self, id: &str, table: RegionTable) -> Arc<RegionTable> {
        let table = Arc::new(table);
        self.documents.insert(id.to_string(), Arc::clone(&table));
        table
    }

    /// Remove and return the pending region table for a document.
    pub fn take(&self, id: &str) -> Option<Arc<RegionTable>> {
        self.documents.remove(id).map(|(_, table)| table)
    }

    /// Drop any pending region table for a document.
    pub fn clear(&self, id: &str) {
        self.documents.remove(id);
    }

    /// Get a document's pending table without consuming it.
    pub fn get(&self, id: &str) -> Option<Arc<RegionTable>> {
        self.documents.get(id).map(|r| Arc::clone(&r))
    }
}
