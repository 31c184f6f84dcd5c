use clap::Parser;
use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use retrieval_cluster::build_router;
use retrieval_cluster::index::store::IndexStore;
use retrieval_cluster::registry::service::ClientRegistry;

/// Indexing server: accepts Connect, Index, and Search calls and pushes a
/// shutdown notification to every registered client when stopped.
#[derive(Parser)]
#[command(name = "retrieval-server")]
struct Args {
    /// Address the RPC listener binds to
    #[arg(long, default_value = "127.0.0.1:50051")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = Arc::new(IndexStore::new());
    let registry = ClientRegistry::new();

    let app = build_router(store.clone(), registry.clone());
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("Server is listening on {}", args.bind);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // Operator commands arrive on stdin; reading blocks, so a plain thread
    // feeds them to the async side.
    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if command_tx.send(line).is_err() {
                break;
            }
        }
    });

    let command_registry = registry.clone();
    let command_store = store.clone();
    tokio::spawn(async move {
        while let Some(line) = command_rx.recv().await {
            match line.trim() {
                "" => {}
                "shutdown" | "quit" => break,
                "clients" => {
                    tracing::info!(
                        "{} client(s) registered",
                        command_registry.client_count()
                    );
                }
                "stats" => {
                    tracing::info!(
                        "{} document(s), {} distinct term(s)",
                        command_store.document_count(),
                        command_store.term_count()
                    );
                }
                other => {
                    tracing::warn!(
                        "Unknown command: {} (expected: clients | stats | shutdown | quit)",
                        other
                    );
                }
            }
        }
        // Explicit command or stdin EOF: notify every registered client
        // first, then stop the listener.
        command_registry.broadcast_shutdown().await;
        let _ = shutdown_tx.send(true);
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
