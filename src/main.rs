//! graphwire-server: a line-oriented TCP server exposing a shared weighted
//! directed graph.
//!
//! One graph engine is created per process and handed to every session; the
//! process runs until ctrl-c.

use anyhow::Result;
use clap::Parser;
use graphwire::core::engine::GraphEngine;
use graphwire::server::config::CliArgs;
use graphwire::server::listener::Server;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = args.resolve()?;
    let engine = Arc::new(GraphEngine::new());
    let server = Server::bind(&config, engine).await?;
    info!(addr = %server.local_addr(), "graphwire-server ready");

    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, shutting down");
    server.shutdown().await;
    Ok(())
}
