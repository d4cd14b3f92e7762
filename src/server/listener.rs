/*!
# TCP Listener

Accepts connections and spawns one session task per client. The accept loop
runs on a background task and is stopped through a oneshot channel, so a
caller can bind, learn the actual port (useful with a requested port of 0),
and later shut down without tearing the process.

A failing session only ever affects itself: its error is logged here and
dropped. In-flight sessions are not interrupted by shutdown; they drain on
their own exit paths.
*/

use crate::core::engine::GraphEngine;
use crate::core::error::GraphwireError;
use crate::server::config::ServerConfig;
use crate::server::session::Session;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A running graphwire server.
pub struct Server {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Server {
    /// Binds the listener and starts serving on a background task.
    ///
    /// The configured port may be `0` to request an ephemeral port; use
    /// [`Server::local_addr`] to learn what was actually bound.
    pub async fn bind(
        config: &ServerConfig,
        engine: Arc<GraphEngine>,
    ) -> Result<Server, GraphwireError> {
        let listener = TcpListener::bind((config.bind, config.port)).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let idle_timeout = config.idle_timeout;
        let handle = tokio::spawn(accept_loop(listener, engine, idle_timeout, shutdown_rx));
        info!(%local_addr, "listening");
        Ok(Server {
            local_addr,
            shutdown: shutdown_tx,
            handle,
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for the accept loop to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}

async fn accept_loop(
    listener: TcpListener,
    engine: Arc<GraphEngine>,
    idle_timeout: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("listener shutting down");
                return;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let session = Session::new(engine.clone(), idle_timeout);
                    debug!(%peer, session = %session.id(), "connection accepted");
                    tokio::spawn(async move {
                        // Transport failures end only this session.
                        if let Err(e) = session.run(stream).await {
                            warn!(%peer, error = %e, "session ended with transport error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "accept failed");
                }
            }
        }
    }
}
