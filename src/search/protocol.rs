//! Search Network Protocol
//!
//! DTOs for the Search RPC. The reply carries a human-readable summary
//! (elapsed time, returned vs. matched counts) alongside the ranked list.

use serde::{Deserialize, Serialize};

/// Endpoint for client search requests.
pub const ENDPOINT_SEARCH: &str = "/search";

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query terms; the literal connector `"and"` is filtered server-side.
    pub terms: Vec<String>,
}

/// One ranked result: the owner key (`clientID:path`) and the summed
/// frequency across all query terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub path: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub documents: Vec<DocumentMatch>,
}
