use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;

use super::protocol::{ConnectRequest, ConnectResponse, ShutdownResponse};
use super::service::ClientRegistry;

pub async fn handle_connect(
    Extension(registry): Extension<Arc<ClientRegistry>>,
    Json(req): Json<ConnectRequest>,
) -> (StatusCode, Json<ConnectResponse>) {
    let client_id = registry.register(req.callback_addr);
    (
        StatusCode::OK,
        Json(ConnectResponse {
            client_id: client_id.0,
        }),
    )
}

/// Informational acknowledgment on the server's own shutdown method. The
/// outbound broadcast to clients is a separate path
/// (`ClientRegistry::broadcast_shutdown`), driven by the operator command.
pub async fn handle_shutdown() -> (StatusCode, Json<ShutdownResponse>) {
    (
        StatusCode::OK,
        Json(ShutdownResponse {
            message: "Server is shutting down.".to_string(),
        }),
    )
}
