/*!
# Wire Protocol

Plain text, one request or response per LF-terminated line, UTF-8. This
module owns both directions of the catalog: parsing client lines into
[`Request`] values and rendering engine results back into response lines.

Every request form is an anchored full-match regex, so trailing characters
of any kind make a line unrecognisable and the session replies with
[`NOT_UNDERSTOOD`]. Node names match `[A-Za-z0-9_-]+` and weights are
non-negative decimal integers; a weight too large for `u64` fails to parse
and falls through to the same reply.
*/

use crate::core::engine::PathCost;
use regex::Regex;
use std::sync::LazyLock;

static CLIENT_GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^HI, I AM ([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$",
    )
    .unwrap()
});
static ADD_NODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ADD NODE ([A-Za-z0-9_-]+)$").unwrap());
static ADD_EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ADD EDGE ([A-Za-z0-9_-]+) ([A-Za-z0-9_-]+) (\d+)$").unwrap());
static REMOVE_NODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^REMOVE NODE ([A-Za-z0-9_-]+)$").unwrap());
static REMOVE_EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^REMOVE EDGE ([A-Za-z0-9_-]+) ([A-Za-z0-9_-]+)$").unwrap());
static SHORTEST_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SHORTEST PATH ([A-Za-z0-9_-]+) ([A-Za-z0-9_-]+)$").unwrap());
static CLOSER_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CLOSER THAN (\d+) ([A-Za-z0-9_-]+)$").unwrap());

/// The client farewell line.
pub const FAREWELL: &str = "BYE MATE!";

/// Reply to any line the server does not recognise.
pub const NOT_UNDERSTOOD: &str = "SORRY, I DID NOT UNDERSTAND THAT";

pub const NODE_ADDED: &str = "NODE ADDED";
pub const NODE_REMOVED: &str = "NODE REMOVED";
pub const EDGE_ADDED: &str = "EDGE ADDED";
pub const EDGE_REMOVED: &str = "EDGE REMOVED";
pub const NODE_ALREADY_EXISTS: &str = "ERROR: NODE ALREADY EXISTS";
pub const NODE_NOT_FOUND: &str = "ERROR: NODE NOT FOUND";

/// Wire token for "no directed path exists".
///
/// Distinct from the missing-endpoint outcome, which maps to
/// [`NODE_NOT_FOUND`].
pub const UNREACHABLE: &str = "2147483647";

/// A graph command from a conversing client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    AddNode(String),
    AddEdge { from: String, to: String, weight: u64 },
    RemoveNode(String),
    RemoveEdge { from: String, to: String },
    ShortestPath { from: String, to: String },
    CloserThan { weight: u64, to: String },
    Bye,
}

impl Request {
    /// Parses a line into a request; `None` means the line is not part of
    /// the command catalog and deserves [`NOT_UNDERSTOOD`].
    pub fn parse(line: &str) -> Option<Request> {
        if line == FAREWELL {
            return Some(Request::Bye);
        }
        if let Some(caps) = ADD_NODE_RE.captures(line) {
            return Some(Request::AddNode(caps[1].to_string()));
        }
        if let Some(caps) = ADD_EDGE_RE.captures(line) {
            return Some(Request::AddEdge {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
                weight: caps[3].parse().ok()?,
            });
        }
        if let Some(caps) = REMOVE_NODE_RE.captures(line) {
            return Some(Request::RemoveNode(caps[1].to_string()));
        }
        if let Some(caps) = REMOVE_EDGE_RE.captures(line) {
            return Some(Request::RemoveEdge {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
            });
        }
        if let Some(caps) = SHORTEST_PATH_RE.captures(line) {
            return Some(Request::ShortestPath {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
            });
        }
        if let Some(caps) = CLOSER_THAN_RE.captures(line) {
            return Some(Request::CloserThan {
                weight: caps[1].parse().ok()?,
                to: caps[2].to_string(),
            });
        }
        None
    }
}

/// Extracts the client id from a `HI, I AM <uuid>` greeting.
pub fn parse_greeting(line: &str) -> Option<&str> {
    CLIENT_GREETING_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The line the server speaks first on every new connection.
pub fn server_greeting(session_id: &str) -> String {
    format!("HI, I AM {}", session_id)
}

/// Reply to an accepted client greeting.
pub fn greeting_reply(client_id: &str) -> String {
    format!("HI {}", client_id)
}

/// The farewell emitted when a session terminates.
///
/// `client_id` is inserted verbatim and may be empty if the client never
/// completed the greeting.
pub fn farewell(client_id: &str, elapsed_ms: u128) -> String {
    format!("BYE {}, WE SPOKE FOR {} MS", client_id, elapsed_ms)
}

/// Renders a shortest-path result line.
pub fn path_cost(cost: PathCost) -> String {
    match cost {
        PathCost::Finite(cost) => cost.to_string(),
        PathCost::Unreachable => UNREACHABLE.to_string(),
    }
}

/// Renders a `CLOSER THAN` result: comma-joined names, no spaces; an empty
/// result renders as an empty line.
pub fn name_list(names: &[String]) -> String {
    names.join(",")
}
