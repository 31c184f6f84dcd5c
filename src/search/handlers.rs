use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use super::engine::DEFAULT_TOP_N;
use super::protocol::{DocumentMatch, SearchRequest, SearchResponse};
use crate::index::store::IndexStore;

pub async fn handle_search(
    Extension(store): Extension<Arc<IndexStore>>,
    Json(req): Json<SearchRequest>,
) -> (StatusCode, Json<SearchResponse>) {
    let start = Instant::now();

    match store.get_top_results(&req.terms, DEFAULT_TOP_N) {
        Ok(ranked) => {
            let elapsed = start.elapsed().as_secs_f64();
            let message = format!(
                "Search completed in {:.6} seconds. Search results (top {} out of {}):",
                elapsed,
                ranked.results.len(),
                ranked.total_matched
            );
            let documents = ranked
                .results
                .into_iter()
                .map(|(path, count)| DocumentMatch { path, count })
                .collect();
            (StatusCode::OK, Json(SearchResponse { message, documents }))
        }
        Err(e) => {
            tracing::warn!("Rejected search request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(SearchResponse {
                    message: e.to_string(),
                    documents: Vec::new(),
                }),
            )
        }
    }
}
