//! Client Agent Tests
//!
//! Validates the pieces of the agent that run without a server: the shutdown
//! handler and the engine's local input checks. The full connect/index/search
//! exchange is covered by the integration tests.

#[cfg(test)]
mod tests {
    use crate::client::engine::ClientEngine;
    use crate::client::handlers::handle_shutdown;
    use axum::extract::Extension;
    use tokio::sync::watch;

    #[tokio::test]
    async fn test_shutdown_handler_flips_flag_and_acknowledges() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let (status, reply) = handle_shutdown(Extension(shutdown_tx)).await;

        assert_eq!(status, axum::http::StatusCode::OK);
        assert_eq!(reply.0.message, "Client is shutting down.");
        assert!(*shutdown_rx.borrow(), "Receipt must flip the shutdown flag");
    }

    #[tokio::test]
    async fn test_index_folder_requires_connect_first() {
        let engine = ClientEngine::new("http://127.0.0.1:1", "127.0.0.1:1".parse().unwrap());

        let result = engine.index_folder(std::path::Path::new("/tmp")).await;

        assert!(result.is_err(), "Indexing before connect must fail");
    }

    #[tokio::test]
    async fn test_search_rejects_empty_term_list_locally() {
        let engine = ClientEngine::new("http://127.0.0.1:1", "127.0.0.1:1".parse().unwrap());

        let result = engine.search(&[]).await;

        assert!(result.is_err(), "Empty queries never reach the network");
    }

    #[test]
    fn test_no_client_id_before_connect() {
        let engine = ClientEngine::new("http://127.0.0.1:50051/", "127.0.0.1:1".parse().unwrap());

        assert_eq!(engine.client_id(), None);
    }
}
