use clap::Parser;
use std::io::BufRead;
use std::net::SocketAddr;
use std::path::Path;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use retrieval_cluster::client::engine::ClientEngine;
use retrieval_cluster::client::handlers::callback_router;

/// Interactive client: indexes local folders into the server and runs
/// ranked searches. Exits when the operator quits or the server pushes a
/// shutdown notification.
#[derive(Parser)]
#[command(name = "retrieval-client")]
struct Args {
    /// Base URL of the indexing server
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    server: String,

    /// Address this client's shutdown endpoint binds to (port 0 picks one)
    #[arg(long, default_value = "127.0.0.1:0")]
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

    // The callback listener must be up before connecting: the server records
    // its address as this client's reverse channel.
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    let callback_addr = listener.local_addr()?;
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, callback_router(shutdown_tx)).await {
            tracing::error!("Callback listener failed: {}", e);
        }
    });

    let engine = ClientEngine::new(&args.server, callback_addr);
    engine.connect().await?;

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

    println!("Options: index <folder path> | search <terms> | quit");
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                println!("Client is shutting down as per server request.");
                break;
            }
            command = command_rx.recv() => {
                let Some(line) = command else { break };
                if !run_command(&engine, line.trim()).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Executes one operator command; returns false when the loop should end.
async fn run_command(engine: &ClientEngine, line: &str) -> bool {
    if line == "quit" {
        println!("Thanks for using the file retrieval engine!");
        return false;
    }
    if let Some(folder) = line.strip_prefix("index ") {
        match engine.index_folder(Path::new(folder.trim())).await {
            Ok(summary) => {
                println!(
                    "Indexed {} document(s), {} bytes, in {:.3} seconds",
                    summary.documents,
                    summary.total_bytes,
                    summary.elapsed.as_secs_f64()
                );
            }
            Err(e) => println!("Failed to index folder: {}", e),
        }
        return true;
    }
    if let Some(query) = line.strip_prefix("search ") {
        let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        match engine.search(&terms).await {
            Ok(reply) => {
                println!("{}", reply.message);
                for document in reply.documents {
                    println!("{}, Count: {}", document.path, document.count);
                }
            }
            Err(e) => println!("Search failed: {}", e),
        }
        return true;
    }
    if !line.is_empty() {
        println!("Invalid command. Options: index <folder path> | search <terms> | quit");
    }
    true
}
