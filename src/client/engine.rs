use anyhow::{Result, anyhow, bail};
use ignore::WalkBuilder;
use parking_lot::RwLock;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::index::protocol::{ENDPOINT_INDEX, IndexRequest, WordFrequency};
use crate::registry::protocol::{ConnectRequest, ConnectResponse, ENDPOINT_CONNECT};
use crate::search::protocol::{ENDPOINT_SEARCH, SearchRequest, SearchResponse};
use crate::search::tokenizer::extract_word_frequencies;

/// Outcome of one folder indexing run.
#[derive(Debug, Clone)]
pub struct IndexSummary {
    pub documents: usize,
    pub total_bytes: u64,
    pub elapsed: Duration,
}

/// The client-side processing engine.
///
/// Holds the server base URL, the callback address registered at connect
/// time, and the identity the server assigned. All calls go over the shared
/// `reqwest` client; none are retried automatically.
pub struct ClientEngine {
    server_url: String,
    callback_addr: SocketAddr,
    client_id: RwLock<Option<String>>,
    http_client: reqwest::Client,
}

impl ClientEngine {
    pub fn new(server_url: &str, callback_addr: SocketAddr) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            callback_addr,
            client_id: RwLock::new(None),
            http_client: reqwest::Client::new(),
        }
    }

    /// The identity assigned by the server, once connected.
    pub fn client_id(&self) -> Option<String> {
        self.client_id.read().clone()
    }

    /// Performs the connect handshake, announcing this client's callback
    /// address and storing the assigned identity. A failed connect leaves
    /// the engine unusable for further calls.
    pub async fn connect(&self) -> Result<String> {
        let request = ConnectRequest {
            callback_addr: self.callback_addr,
        };
        let response = self
            .http_client
            .post(format!("{}{}", self.server_url, ENDPOINT_CONNECT))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Connect rejected by server: {}", response.status());
        }
        let reply: ConnectResponse = response.json().await?;
        *self.client_id.write() = Some(reply.client_id.clone());
        tracing::info!("Connected to server with client id {}", reply.client_id);
        Ok(reply.client_id)
    }

    /// Walks `folder` recursively and indexes every regular file.
    ///
    /// Unreadable files are reported as an empty frequency table and still
    /// indexed; a failed Index call aborts the remaining batch (a partial
    /// index is accepted). Reports total bytes and elapsed time on success.
    pub async fn index_folder(&self, folder: &Path) -> Result<IndexSummary> {
        let client_id = self
            .client_id()
            .ok_or_else(|| anyhow!("Not connected: no client id assigned yet"))?;
        if !folder.is_dir() {
            bail!("Invalid folder path: {}", folder.display());
        }

        let start = Instant::now();
        let mut total_bytes = 0u64;
        let mut documents = 0usize;

        let walker = WalkBuilder::new(folder).standard_filters(false).build();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
                continue;
            }
            let path = entry.path();

            let content = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Failed to open file {}: {}", path.display(), e);
                    Vec::new()
                }
            };
            total_bytes += content.len() as u64;
            let frequencies = extract_word_frequencies(&String::from_utf8_lossy(&content));

            let request = IndexRequest {
                client_id: client_id.clone(),
                document_path: path.display().to_string(),
                word_frequencies: frequencies
                    .into_iter()
                    .map(|(word, count)| WordFrequency { word, count })
                    .collect(),
            };
            let response = self
                .http_client
                .post(format!("{}{}", self.server_url, ENDPOINT_INDEX))
                .json(&request)
                .send()
                .await?;
            if !response.status().is_success() {
                bail!(
                    "Index call for {} failed: {}",
                    path.display(),
                    response.status()
                );
            }
            documents += 1;
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "Completed indexing {} bytes of data in {:.3} seconds",
            total_bytes,
            elapsed.as_secs_f64()
        );
        Ok(IndexSummary {
            documents,
            total_bytes,
            elapsed,
        })
    }

    /// Issues a search call and returns the server's ranked reply.
    pub async fn search(&self, terms: &[String]) -> Result<SearchResponse> {
        if terms.is_empty() {
            bail!("Please provide at least 1 search term.");
        }
        let request = SearchRequest {
            terms: terms.to_vec(),
        };
        let response = self
            .http_client
            .post(format!("{}{}", self.server_url, ENDPOINT_SEARCH))
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let reply: SearchResponse = response.json().await?;
        if !status.is_success() {
            bail!("Search failed: {}", reply.message);
        }
        tracing::info!("Server message: {}", reply.message);
        for document in &reply.documents {
            tracing::info!(
                "ClientID:Document Path: {}, Count: {}",
                document.path,
                document.count
            );
        }
        Ok(reply)
    }
}
