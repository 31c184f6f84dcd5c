use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::search::engine::{self, RankedSearch, SearchError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Document number {0} does not exist.")]
    UnknownDocument(u64),
}

/// Document numbering table. The counter lives under the same lock as the
/// maps so that allocation and insertion are a single atomic step.
struct DocumentTable {
    next_id: u64,
    by_id: HashMap<u64, String>,
    by_path: HashMap<String, u64>,
}

/// Concurrent store holding the document table and the inverted index.
///
/// Two independent read/write locks guard the two structures. The only place
/// both are held is `update_index`, which takes the inverted-index lock first
/// and the document lock (shared) second. That order is never reversed.
pub struct IndexStore {
    documents: RwLock<DocumentTable>,
    inverted: RwLock<HashMap<String, Vec<(String, u64)>>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(DocumentTable {
                next_id: 1,
                by_id: HashMap::new(),
                by_path: HashMap::new(),
            }),
            inverted: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the document id for `path`, allocating the next id on first
    /// observation. Idempotent: re-submitting a known path returns the
    /// existing id.
    pub fn put_document(&self, path: &str) -> u64 {
        let mut documents = self.documents.write();
        if let Some(&id) = documents.by_path.get(path) {
            return id;
        }
        let id = documents.next_id;
        documents.next_id += 1;
        documents.by_id.insert(id, path.to_string());
        documents.by_path.insert(path.to_string(), id);
        id
    }

    /// Resolves a document id back to its path. `None` for unknown ids;
    /// absence is a normal outcome, not a fault.
    pub fn get_document(&self, document_id: u64) -> Option<String> {
        self.documents.read().by_id.get(&document_id).cloned()
    }

    /// Merges one document's term frequencies into the inverted index on
    /// behalf of `client_id`.
    ///
    /// The inverted-index lock is held exclusively for the whole multi-term
    /// merge so racing calls cannot interleave partial sums. Frequencies for
    /// an existing (term, owner) pair accumulate, never overwrite.
    pub fn update_index(
        &self,
        client_id: &str,
        document_id: u64,
        term_frequencies: &[(String, u64)],
    ) -> Result<(), IndexError> {
        let mut inverted = self.inverted.write();
        // Lock order: inverted index, then documents (shared). Never reversed.
        let path = self
            .documents
            .read()
            .by_id
            .get(&document_id)
            .cloned()
            .ok_or(IndexError::UnknownDocument(document_id))?;
        let owner_key = format!("{}:{}", client_id, path);

        for (term, frequency) in term_frequencies {
            let owners = inverted.entry(term.clone()).or_default();
            // Linear scan over the owner list; at most one entry per owner.
            match owners.iter_mut().find(|entry| entry.0 == owner_key) {
                Some(entry) => entry.1 += *frequency,
                None => owners.push((owner_key.clone(), *frequency)),
            }
        }
        Ok(())
    }

    /// Returns the (owner key, frequency) list for a term. Empty for unknown
    /// terms.
    pub fn lookup_index(&self, term: &str) -> Vec<(String, u64)> {
        self.inverted
            .read()
            .get(term)
            .cloned()
            .unwrap_or_default()
    }

    /// Ranked AND search over the index, delegating to the query engine.
    pub fn get_top_results(
        &self,
        terms: &[String],
        top_n: usize,
    ) -> Result<RankedSearch, SearchError> {
        engine::search(self, terms, top_n)
    }

    pub fn document_count(&self) -> usize {
        self.documents.read().by_id.len()
    }

    pub fn term_count(&self) -> usize {
        self.inverted.read().len()
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}
