/*!
# Session State Machine

One `Session` exists per accepted connection. It owns the read loop over
newline-delimited text and layers the greeting/farewell handshake and the
inactivity timeout over an otherwise stateless command loop:

```text
AwaitGreeting --(HI, I AM <uuid>)--> Conversing --(BYE MATE!)--> Terminating
```

Any exit path (client farewell, idle timeout, EOF, transport error) passes
through `Terminating`, which emits a farewell carrying the elapsed session
time in whole milliseconds and releases the connection. The farewell write
is best-effort; a failure there is swallowed.

Within one session, commands are processed and replied to in strict FIFO
order. Transport errors never propagate to the engine or other sessions.
*/

use crate::core::engine::GraphEngine;
use crate::server::protocol::{self, Request};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitGreeting,
    Conversing,
    Terminating,
}

/// The server-side representation of one connection and its protocol state.
pub struct Session {
    id: Uuid,
    client_id: Option<String>,
    started: Instant,
    state: SessionState,
    engine: Arc<GraphEngine>,
    idle_timeout: Duration,
}

impl Session {
    /// Creates a session over the shared engine with a fresh session id.
    pub fn new(engine: Arc<GraphEngine>, idle_timeout: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            started: Instant::now(),
            state: SessionState::AwaitGreeting,
            engine,
            idle_timeout,
        }
    }

    /// The server-generated session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Drives the session over the given connection until it terminates.
    ///
    /// Emits the server greeting, then loops on timed line reads until the
    /// state machine reaches `Terminating`, and finally attempts the
    /// farewell. The returned error, if any, is the transport failure that
    /// ended the session; the caller is expected to log and drop it.
    pub async fn run<S>(mut self, stream: S) -> io::Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (read_half, mut write_half) = tokio::io::split(stream);
        let mut reader = BufReader::new(read_half);

        let outcome = self.drive(&mut reader, &mut write_half).await;

        let elapsed_ms = self.started.elapsed().as_millis();
        let farewell =
            protocol::farewell(self.client_id.as_deref().unwrap_or(""), elapsed_ms);
        // Best-effort: the peer may already be gone.
        let _ = send_line(&mut write_half, &farewell).await;
        info!(session = %self.id, elapsed_ms, "session closed");
        outcome
    }

    async fn drive<R, W>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        send_line(writer, &protocol::server_greeting(&self.id.to_string())).await?;

        let mut line = String::new();
        while self.state != SessionState::Terminating {
            line.clear();
            match timeout(self.idle_timeout, reader.read_line(&mut line)).await {
                // No input within the idle bound.
                Err(_) => {
                    debug!(session = %self.id, "idle timeout");
                    self.state = SessionState::Terminating;
                }
                // EOF: the client hung up without a farewell.
                Ok(Ok(0)) => {
                    debug!(session = %self.id, "connection closed by peer");
                    self.state = SessionState::Terminating;
                }
                Ok(Ok(_)) => {
                    let request = line.trim_end_matches(['\r', '\n']);
                    if let Some(reply) = self.advance(request) {
                        send_line(writer, &reply).await?;
                    }
                }
                Ok(Err(e)) => {
                    self.state = SessionState::Terminating;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Feeds one decoded line through the state machine and returns the
    /// reply to send, if any. Transitions into `Terminating` produce no
    /// reply here; the farewell is emitted by [`Session::run`].
    fn advance(&mut self, line: &str) -> Option<String> {
        match self.state {
            SessionState::AwaitGreeting => {
                if line == protocol::FAREWELL {
                    self.state = SessionState::Terminating;
                    return None;
                }
                match protocol::parse_greeting(line) {
                    Some(client_id) => {
                        debug!(session = %self.id, client = client_id, "greeting accepted");
                        self.client_id = Some(client_id.to_string());
                        self.state = SessionState::Conversing;
                        Some(protocol::greeting_reply(client_id))
                    }
                    None => Some(protocol::NOT_UNDERSTOOD.to_string()),
                }
            }
            SessionState::Conversing => match Request::parse(line) {
                Some(Request::Bye) => {
                    self.state = SessionState::Terminating;
                    None
                }
                Some(request) => Some(self.dispatch(request)),
                None => Some(protocol::NOT_UNDERSTOOD.to_string()),
            },
            SessionState::Terminating => None,
        }
    }

    fn dispatch(&self, request: Request) -> String {
        match request {
            Request::AddNode(name) => {
                if self.engine.add_node(&name) {
                    protocol::NODE_ADDED.to_string()
                } else {
                    protocol::NODE_ALREADY_EXISTS.to_string()
                }
            }
            Request::AddEdge { from, to, weight } => {
                if self.engine.add_edge(&from, &to, weight) {
                    protocol::EDGE_ADDED.to_string()
                } else {
                    protocol::NODE_NOT_FOUND.to_string()
                }
            }
            Request::RemoveNode(name) => {
                if self.engine.remove_node(&name) {
                    protocol::NODE_REMOVED.to_string()
                } else {
                    protocol::NODE_NOT_FOUND.to_string()
                }
            }
            Request::RemoveEdge { from, to } => {
                if self.engine.remove_edge(&from, &to) {
                    protocol::EDGE_REMOVED.to_string()
                } else {
                    protocol::NODE_NOT_FOUND.to_string()
                }
            }
            Request::ShortestPath { from, to } => match self.engine.shortest_path(&from, &to) {
                Some(cost) => protocol::path_cost(cost),
                None => protocol::NODE_NOT_FOUND.to_string(),
            },
            Request::CloserThan { weight, to } => match self.engine.closer_than(weight, &to) {
                Some(names) => protocol::name_list(&names),
                None => protocol::NODE_NOT_FOUND.to_string(),
            },
            // Handled by `advance`.
            Request::Bye => String::new(),
        }
    }
}

async fn send_line<W>(writer: &mut W, line: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
