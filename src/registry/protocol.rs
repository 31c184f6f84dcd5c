//! Registry Network Protocol
//!
//! DTOs for the Connect handshake and the Shutdown method. The same
//! `/shutdown` path is served by both sides: on the server it is an
//! informational acknowledgment; on a client it is the server-initiated
//! "stop operating" push.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Endpoint for the connect handshake.
pub const ENDPOINT_CONNECT: &str = "/connect";
/// Endpoint for shutdown, served by the server (informational) and by every
/// client (server-initiated push).
pub const ENDPOINT_SHUTDOWN: &str = "/shutdown";

/// Connect handshake payload.
///
/// Carries the address the client's own shutdown endpoint listens on. The
/// server stores it as the reverse channel for the shutdown broadcast.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub callback_addr: SocketAddr,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectResponse {
    /// Identity assigned by the server; quoted in every later Index call.
    pub client_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShutdownResponse {
    pub message: String,
}
