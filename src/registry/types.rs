use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server-assigned client identity: an incrementing counter rendered as a
/// string. Unique within one server lifetime, never reused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientId(pub String);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered client and the reverse channel used to reach it.
///
/// `callback_addr` is the client's own externally reachable address,
/// supplied by the client in its Connect request. The shutdown broadcast
/// posts to this address.
#[derive(Debug, Clone)]
pub struct ClientRegistration {
    pub client_id: ClientId,
    pub callback_addr: SocketAddr,
}
