//! Index Network Protocol
//!
//! DTOs for the Index RPC: a client ships one document's term frequency
//! table to the server, which merges it into the shared inverted index.

use serde::{Deserialize, Serialize};

/// Endpoint for client indexing requests.
pub const ENDPOINT_INDEX: &str = "/index";

/// A single (word, count) pair extracted from a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

/// Payload for indexing one document.
///
/// Idempotent on `document_path` for numbering purposes; the frequencies
/// themselves accumulate across repeated calls for the same client and path.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexRequest {
    /// Identity assigned by the server at connect time.
    pub client_id: String,
    /// Path of the document on the client's filesystem.
    pub document_path: String,
    /// Term frequency table produced by the client-side tokenizer.
    pub word_frequencies: Vec<WordFrequency>,
}

/// Acknowledgment naming the indexed document.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
}
