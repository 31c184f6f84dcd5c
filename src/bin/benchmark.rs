use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use retrieval_cluster::client::engine::{ClientEngine, IndexSummary};
use retrieval_cluster::client::handlers::callback_router;

/// Benchmark driver: spins up one synthetic client per dataset folder, lets
/// them index concurrently, and optionally issues a single search once every
/// client has finished.
#[derive(Parser)]
#[command(name = "retrieval-benchmark")]
struct Args {
    /// Base URL of the indexing server
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    server: String,

    /// Search terms to run after indexing completes
    #[arg(long, num_args = 1..)]
    search: Vec<String>,

    /// One dataset folder per synthetic client
    #[arg(required = true)]
    datasets: Vec<PathBuf>,
}

/// Connects a synthetic client (with its own callback listener) and indexes
/// one dataset folder.
async fn run_client(server: String, dataset: PathBuf) -> anyhow::Result<IndexSummary> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let callback_addr = listener.local_addr()?;
    let (shutdown_tx, _shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = axum::serve(listener, callback_router(shutdown_tx)).await;
    });

    let engine = ClientEngine::new(&server, callback_addr);
    engine.connect().await?;
    engine.index_folder(&dataset).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let client_count = args.datasets.len();
    tracing::info!("Starting benchmark with {} client(s)", client_count);

    let start = Instant::now();
    let mut handles = Vec::with_capacity(client_count);
    for dataset in args.datasets {
        handles.push((
            dataset.clone(),
            tokio::spawn(run_client(args.server.clone(), dataset)),
        ));
    }

    let mut failures = 0usize;
    for (dataset, handle) in handles {
        match handle.await? {
            Ok(summary) => {
                tracing::info!(
                    "Client finished indexing {}: {} document(s), {} bytes in {:.3} seconds",
                    dataset.display(),
                    summary.documents,
                    summary.total_bytes,
                    summary.elapsed.as_secs_f64()
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!("Failed to index folder {}: {}", dataset.display(), e);
            }
        }
    }
    tracing::info!(
        "Completed indexing for {}/{} client(s) in {:.3} seconds",
        client_count - failures,
        client_count,
        start.elapsed().as_secs_f64()
    );

    if !args.search.is_empty() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let callback_addr = listener.local_addr()?;
        let (shutdown_tx, _shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            let _ = axum::serve(listener, callback_router(shutdown_tx)).await;
        });

        let engine = ClientEngine::new(&args.server, callback_addr);
        engine.connect().await?;
        let reply = engine.search(&args.search).await?;
        println!("{}", reply.message);
        for document in reply.documents {
            println!("{}, Count: {}", document.path, document.count);
        }
    }

    Ok(())
}
