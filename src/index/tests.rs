//! Index Store Tests
//!
//! Validates document numbering, the inverted-index merge semantics, and the
//! locking behavior under concurrent access.
//!
//! ## Test Scopes
//! - **Document numbering**: Uniqueness, idempotency, and lookup misses.
//! - **Inverted index**: Accumulation semantics and per-owner entries.
//! - **Concurrency**: Racing updates must never lose an increment.

#[cfg(test)]
mod tests {
    use crate::index::store::{IndexError, IndexStore};
    use std::sync::Arc;

    fn frequencies(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    // ============================================================
    // DOCUMENT NUMBERING TESTS
    // ============================================================

    #[test]
    fn test_put_document_assigns_increasing_ids_from_one() {
        let store = IndexStore::new();

        let first = store.put_document("/data/a.txt");
        let second = store.put_document("/data/b.txt");

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_put_document_is_idempotent() {
        let store = IndexStore::new();

        let first = store.put_document("/data/a.txt");
        let again = store.put_document("/data/a.txt");

        assert_eq!(first, again, "Same path must keep its id");
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn test_distinct_paths_get_distinct_ids() {
        let store = IndexStore::new();

        let a = store.put_document("/data/a.txt");
        let b = store.put_document("/data/b.txt");

        assert_ne!(a, b);
    }

    #[test]
    fn test_get_document_resolves_path() {
        let store = IndexStore::new();

        let id = store.put_document("/data/a.txt");

        assert_eq!(store.get_document(id), Some("/data/a.txt".to_string()));
    }

    #[test]
    fn test_get_document_unknown_returns_none() {
        let store = IndexStore::new();

        assert_eq!(store.get_document(42), None);
    }

    // ============================================================
    // INVERTED INDEX TESTS
    // ============================================================

    #[test]
    fn test_update_index_creates_owner_entry() {
        let store = IndexStore::new();
        let id = store.put_document("/data/a.txt");

        store
            .update_index("1", id, &frequencies(&[("apple", 3)]))
            .unwrap();

        let owners = store.lookup_index("apple");
        assert_eq!(owners, vec![("1:/data/a.txt".to_string(), 3)]);
    }

    #[test]
    fn test_update_index_accumulates_not_overwrites() {
        let store = IndexStore::new();
        let id = store.put_document("/data/a.txt");

        store
            .update_index("1", id, &frequencies(&[("apple", 3)]))
            .unwrap();
        store
            .update_index("1", id, &frequencies(&[("apple", 4)]))
            .unwrap();

        let owners = store.lookup_index("apple");
        assert_eq!(owners.len(), 1, "One entry per (term, owner)");
        assert_eq!(owners[0].1, 7, "Frequencies must sum, not replace");
    }

    #[test]
    fn test_update_index_distinguishes_clients_on_same_path() {
        let store = IndexStore::new();
        // Two clients submit the identical path string. They share one
        // document id but stay distinct owners in the inverted index.
        let id_one = store.put_document("/shared/data.txt");
        let id_two = store.put_document("/shared/data.txt");
        assert_eq!(id_one, id_two);

        store
            .update_index("1", id_one, &frequencies(&[("apple", 2)]))
            .unwrap();
        store
            .update_index("2", id_two, &frequencies(&[("apple", 5)]))
            .unwrap();

        let mut owners = store.lookup_index("apple");
        owners.sort();
        assert_eq!(
            owners,
            vec![
                ("1:/shared/data.txt".to_string(), 2),
                ("2:/shared/data.txt".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_update_index_unknown_document_is_reported() {
        let store = IndexStore::new();

        let result = store.update_index("1", 99, &frequencies(&[("apple", 1)]));

        assert_eq!(result, Err(IndexError::UnknownDocument(99)));
        assert!(store.lookup_index("apple").is_empty());
    }

    #[test]
    fn test_lookup_unknown_term_returns_empty_list() {
        let store = IndexStore::new();

        let owners = store.lookup_index("zzz-nonexistent");

        assert!(owners.is_empty(), "Unknown term is not a fault");
    }

    #[test]
    fn test_multi_term_update_is_applied_whole() {
        let store = IndexStore::new();
        let id = store.put_document("/data/a.txt");

        store
            .update_index("1", id, &frequencies(&[("apple", 1), ("banana", 2)]))
            .unwrap();

        assert_eq!(store.lookup_index("apple")[0].1, 1);
        assert_eq!(store.lookup_index("banana")[0].1, 2);
        assert_eq!(store.term_count(), 2);
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[test]
    fn test_concurrent_updates_never_lose_increments() {
        let store = Arc::new(IndexStore::new());
        let id = store.put_document("/data/a.txt");
        let threads = 32;

        std::thread::scope(|scope| {
            for _ in 0..threads {
                let store = store.clone();
                scope.spawn(move || {
                    store
                        .update_index("1", id, &frequencies(&[("apple", 1)]))
                        .unwrap();
                });
            }
        });

        let owners = store.lookup_index("apple");
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].1, threads, "Every racing increment must land");
    }

    #[test]
    fn test_concurrent_put_document_same_path_agrees() {
        let store = Arc::new(IndexStore::new());

        let ids: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let store = store.clone();
                    scope.spawn(move || store.put_document("/data/a.txt"))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(ids.iter().all(|&id| id == ids[0]));
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn test_concurrent_put_document_distinct_paths_stay_unique() {
        let store = Arc::new(IndexStore::new());

        let ids: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let store = store.clone();
                    scope.spawn(move || store.put_document(&format!("/data/{}.txt", i)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len(), "No id may be handed out twice");
    }
}
