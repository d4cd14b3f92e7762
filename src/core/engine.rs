/*!
# Graph Engine

The process-wide graph shared by every session. `GraphEngine` wraps a
[`GraphStore`](crate::core::types::GraphStore) and a cached all-pairs
distance matrix behind a readers-writer lock:

- Mutations (`add_node`, `add_edge`, `remove_node`, `remove_edge`) take the
  write lock and discard the cached matrix whenever they change state.
- `shortest_path` takes the read lock and runs Dijkstra against the current
  topology, so concurrent queries proceed in parallel.
- `closer_than` takes an upgradable read; when the cache is absent it
  upgrades to exclusive access, rebuilds the matrix with Floyd–Warshall, and
  answers from the fresh matrix.

An absent matrix *is* the dirty state: the only way to observe a matrix is
to have just built one, or to hold the lock while no mutation has discarded
it, so a cached matrix always matches the topology a reader sees.

Domain-level refusals (adding a node that exists, querying a missing node)
are ordinary return values, never errors.
*/

use crate::core::paths::{AllPairs, dijkstra, floyd_warshall};
use crate::core::types::GraphStore;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

/// Result of a successful shortest-path query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCost {
    /// A directed path exists with the given total weight.
    Finite(u64),
    /// No directed path connects the endpoints.
    Unreachable,
}

#[derive(Debug, Default)]
struct EngineState {
    store: GraphStore,
    all_pairs: Option<AllPairs>,
}

impl EngineState {
    fn invalidate(&mut self) {
        self.all_pairs = None;
    }
}

/// The shared, in-memory graph engine.
///
/// One instance is created at startup and handed to every session. All
/// operations are synchronous and none blocks on I/O; operations across
/// sessions are linearizable with respect to the internal lock.
#[derive(Debug, Default)]
pub struct GraphEngine {
    state: RwLock<EngineState>,
}

impl GraphEngine {
    /// Creates an engine with an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given name.
    ///
    /// Returns `false` if a node with that name already exists.
    pub fn add_node(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if state.store.insert_node(name) {
            state.invalidate();
            true
        } else {
            false
        }
    }

    /// Adds the edge `(from, to)` or lowers its weight.
    ///
    /// Returns `false` iff either endpoint is missing. An existing edge is
    /// improved in place when `weight` is strictly lower than the stored
    /// one; a non-improving weight is an idempotent success and leaves the
    /// cached matrix intact.
    pub fn add_edge(&self, from: &str, to: &str, weight: u64) -> bool {
        let mut state = self.state.write();
        match state.store.upsert_edge(from, to, weight) {
            None => false,
            Some(outcome) => {
                if outcome.changed_state() {
                    state.invalidate();
                }
                true
            }
        }
    }

    /// Removes a node and every edge incident to it.
    ///
    /// Returns `false` if no node with that name exists.
    pub fn remove_node(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if state.store.remove_node(name) {
            state.invalidate();
            true
        } else {
            false
        }
    }

    /// Removes the edge `(from, to)` if present.
    ///
    /// Returns `false` iff either endpoint is missing; removing an absent
    /// edge between existing nodes succeeds without touching anything.
    pub fn remove_edge(&self, from: &str, to: &str) -> bool {
        let mut state = self.state.write();
        match state.store.remove_edge(from, to) {
            None => false,
            Some(removed) => {
                if removed {
                    state.invalidate();
                }
                true
            }
        }
    }

    /// Computes the cost of the shortest directed path from `from` to `to`.
    ///
    /// Returns `None` iff either endpoint is missing.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<PathCost> {
        let state = self.state.read();
        let source = state.store.node_id(from)?;
        let target = state.store.node_id(to)?;
        let dist = dijkstra(&state.store, source);
        Some(
            dist.get(&target)
                .map_or(PathCost::Unreachable, |&cost| PathCost::Finite(cost)),
        )
    }

    /// Returns every node name whose distance from `to` is strictly below
    /// `weight`, sorted ascending and excluding `to` itself.
    ///
    /// Returns `None` iff `to` is missing, which is distinct from an empty
    /// result. May rebuild and cache the all-pairs matrix.
    pub fn closer_than(&self, weight: u64, to: &str) -> Option<Vec<String>> {
        let state = self.state.upgradable_read();
        if let Some(all_pairs) = &state.all_pairs {
            return all_pairs.closer_than(weight, to);
        }
        // The upgrade is atomic: no writer can slip in between the check
        // above and the exclusive access below.
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        debug!(
            nodes = state.store.node_count(),
            edges = state.store.edge_count(),
            "rebuilding all-pairs distance matrix"
        );
        let all_pairs = floyd_warshall(&state.store);
        let result = all_pairs.closer_than(weight, to);
        state.all_pairs = Some(all_pairs);
        result
    }

    /// Returns the number of nodes currently in the graph.
    pub fn node_count(&self) -> usize {
        self.state.read().store.node_count()
    }

    /// Returns the number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.state.read().store.edge_count()
    }
}
