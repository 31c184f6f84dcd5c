use axum::{Json, Router, extract::Extension, http::StatusCode, routing::post};
use tokio::sync::watch;

use crate::registry::protocol::{ENDPOINT_SHUTDOWN, ShutdownResponse};

/// Server-initiated shutdown push. Receipt means "stop operating": the
/// handler flips the flag the client's command loop watches.
pub async fn handle_shutdown(
    Extension(shutdown): Extension<watch::Sender<bool>>,
) -> (StatusCode, Json<ShutdownResponse>) {
    tracing::info!("Received shutdown notification from server");
    let _ = shutdown.send(true);
    (
        StatusCode::OK,
        Json(ShutdownResponse {
            message: "Client is shutting down.".to_string(),
        }),
    )
}

/// Builds the client's callback router: the one endpoint the server can
/// reach over the reverse channel.
pub fn callback_router(shutdown: watch::Sender<bool>) -> Router {
    Router::new()
        .route(ENDPOINT_SHUTDOWN, post(handle_shutdown))
        .layer(Extension(shutdown))
}
