//! Distributed File Retrieval Engine Library
//!
//! This library crate defines the core modules of the indexing service.
//! It serves as the foundation for the three binaries (`retrieval-server`,
//! `retrieval-client`, `retrieval-benchmark`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`index`**: The concurrent inverted-index store. Owns document numbering
//!   (path to id), the term-to-owner frequency lists, and the merge semantics
//!   for concurrent indexing calls.
//! - **`search`**: The information retrieval logic. Contains the tokenizer,
//!   the AND-intersection ranking algorithm, and the search RPC handler.
//! - **`registry`**: The client coordination layer. Assigns client identities,
//!   tracks callback addresses, and pushes shutdown notifications to every
//!   registered client when the server stops.
//! - **`client`**: The per-process client agent. Connects to the server,
//!   tokenizes local files, issues indexing and search calls, and serves its
//!   own shutdown endpoint (the client is reciprocally a small HTTP server).

use std::sync::Arc;

use axum::{Extension, Router, routing::post};

pub mod client;
pub mod index;
pub mod registry;
pub mod search;

use index::store::IndexStore;
use registry::service::ClientRegistry;

/// Builds the server-side RPC router: Connect, Index, Search, and the
/// informational Shutdown acknowledgment.
pub fn build_router(store: Arc<IndexStore>, registry: Arc<ClientRegistry>) -> Router {
    Router::new()
        .route(
            registry::protocol::ENDPOINT_CONNECT,
            post(registry::handlers::handle_connect),
        )
        .route(
            index::protocol::ENDPOINT_INDEX,
            post(index::handlers::handle_index),
        )
        .route(
            search::protocol::ENDPOINT_SEARCH,
            post(search::handlers::handle_search),
        )
        .route(
            registry::protocol::ENDPOINT_SHUTDOWN,
            post(registry::handlers::handle_shutdown),
        )
        .layer(Extension(store))
        .layer(Extension(registry))
}
