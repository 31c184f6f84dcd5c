use std::collections::HashMap;

use thiserror::Error;

use crate::index::store::IndexStore;

/// Result count the RPC facade always requests.
pub const DEFAULT_TOP_N: usize = 10;

/// Query connector word filtered out before evaluation.
const AND_CONNECTOR: &str = "and";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("No search terms provided.")]
    NoTerms,
}

/// Outcome of a ranked AND search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSearch {
    /// Top results as (owner key, summed frequency), highest first.
    pub results: Vec<(String, u64)>,
    /// How many owners matched every term, before truncation.
    pub total_matched: usize,
}

/// Multi-term AND search with frequency ranking.
///
/// The first term seeds a working table of owner frequencies; every further
/// term intersects it, adding its own frequency for surviving owners and
/// dropping the rest. Survivors are ranked by summed frequency descending,
/// ties broken by ascending owner key, then truncated to `limit`.
///
/// Each per-term lookup is atomic, but the query as a whole is not a single
/// snapshot across terms.
pub fn search(
    store: &IndexStore,
    terms: &[String],
    limit: usize,
) -> Result<RankedSearch, SearchError> {
    let terms: Vec<&String> = terms
        .iter()
        .filter(|term| term.as_str() != AND_CONNECTOR)
        .collect();
    if terms.is_empty() {
        return Err(SearchError::NoTerms);
    }

    let mut owner_totals: HashMap<String, u64> =
        store.lookup_index(terms[0]).into_iter().collect();

    for term in &terms[1..] {
        let term_owners: HashMap<String, u64> =
            store.lookup_index(term.as_str()).into_iter().collect();

        owner_totals = owner_totals
            .into_iter()
            .filter_map(|(owner, total)| {
                term_owners
                    .get(&owner)
                    .map(|frequency| (owner, total + frequency))
            })
            .collect();
    }

    let total_matched = owner_totals.len();

    let mut results: Vec<(String, u64)> = owner_totals.into_iter().collect();
    results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    results.truncate(limit);

    Ok(RankedSearch {
        results,
        total_matched,
    })
}
