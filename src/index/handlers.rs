use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;

use super::protocol::{IndexRequest, IndexResponse};
use super::store::IndexStore;

pub async fn handle_index(
    Extension(store): Extension<Arc<IndexStore>>,
    Json(req): Json<IndexRequest>,
) -> (StatusCode, Json<IndexResponse>) {
    let document_id = store.put_document(&req.document_path);

    let term_frequencies: Vec<(String, u64)> = req
        .word_frequencies
        .into_iter()
        .map(|entry| (entry.word, entry.count))
        .collect();

    match store.update_index(&req.client_id, document_id, &term_frequencies) {
        Ok(()) => {
            tracing::debug!(
                "Indexed document {} (id {}) for client {}",
                req.document_path,
                document_id,
                req.client_id
            );
            (
                StatusCode::OK,
                Json(IndexResponse {
                    message: format!("Indexing complete for document: {}", req.document_path),
                }),
            )
        }
        Err(e) => {
            tracing::error!("Failed to update index for {}: {}", req.document_path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(IndexResponse {
                    message: e.to_string(),
                }),
            )
        }
    }
}
