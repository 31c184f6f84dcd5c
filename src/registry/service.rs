use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::protocol::ENDPOINT_SHUTDOWN;
use super::types::{ClientId, ClientRegistration};

/// Per-client delivery timeout for the shutdown push. A slow or unreachable
/// client delays the broadcast by at most this long.
const SHUTDOWN_DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Tracks connected clients and dispatches the shutdown broadcast.
///
/// Registrations are only removed through `unregister`; no normal request
/// path invokes it, so entries live for the server's lifetime.
pub struct ClientRegistry {
    clients: DashMap<ClientId, ClientRegistration>,
    next_client_id: AtomicU64,
    http_client: reqwest::Client,
}

impl ClientRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            clients: DashMap::new(),
            next_client_id: AtomicU64::new(1),
            http_client: reqwest::Client::new(),
        })
    }

    /// Assigns the next client identity and records the client's callback
    /// address as its reverse channel.
    pub fn register(&self, callback_addr: SocketAddr) -> ClientId {
        let client_id = ClientId(
            self.next_client_id
                .fetch_add(1, Ordering::SeqCst)
                .to_string(),
        );
        self.clients.insert(
            client_id.clone(),
            ClientRegistration {
                client_id: client_id.clone(),
                callback_addr,
            },
        );
        tracing::info!(
            "Provided client id {} (callback {})",
            client_id,
            callback_addr
        );
        client_id
    }

    /// Removes a registration. Identities are not reused afterwards.
    pub fn unregister(&self, client_id: &ClientId) {
        if self.clients.remove(client_id).is_some() {
            tracing::info!("Unregistered client {}", client_id);
        }
    }

    /// Snapshot of the current membership.
    pub fn registered_clients(&self) -> Vec<ClientRegistration> {
        self.clients
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Pushes a shutdown call to every registered client, best-effort.
    ///
    /// The membership is snapshotted up front; the map is never locked across
    /// a network round-trip. A failed delivery is logged and skipped, it
    /// aborts neither the remaining deliveries nor the server's own shutdown.
    pub async fn broadcast_shutdown(&self) {
        let clients = self.registered_clients();
        tracing::info!("Broadcasting shutdown to {} client(s)", clients.len());

        for client in clients {
            let url = format!("http://{}{}", client.callback_addr, ENDPOINT_SHUTDOWN);
            let result = self
                .http_client
                .post(url)
                .timeout(SHUTDOWN_DELIVERY_TIMEOUT)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::info!("Client {} acknowledged shutdown", client.client_id);
                }
                Ok(response) => {
                    tracing::warn!(
                        "Client {} answered shutdown with {}",
                        client.client_id,
                        response.status()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to notify client {}: {}",
                        client.client_id,
                        e
                    );
                }
            }
        }
    }
}
