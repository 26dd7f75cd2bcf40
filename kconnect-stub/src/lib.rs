//! kconnect Stub Worker
//!
//! An in-memory stand-in for a Connect worker that serves the connector
//! management REST API over HTTP. Integration tests point the client at it
//! instead of a real cluster.

pub mod api;
pub mod worker;

pub use worker::{Worker, WorkerError};

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Serve the worker API on an already bound listener until the task is dropped
pub async fn run(listener: TcpListener, worker: Worker) -> Result<(), std::io::Error> {
    axum::serve(listener, api::create_router(worker)).await
}

/// Bind a random local port and serve `worker` from a background task
///
/// Returns the bound address, e.g. `127.0.0.1:49152`.
pub async fn spawn(worker: Worker) -> Result<SocketAddr, std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tracing::info!("Stub worker {} listening on {}", worker.worker_id(), addr);

    tokio::spawn(async move {
        if let Err(e) = run(listener, worker).await {
            tracing::error!("Stub worker stopped: {}", e);
        }
    });

    Ok(addr)
}
