/*!
# Shortest Paths Algorithms

This module provides the two shortest-path computations used by the engine:

- **Dijkstra's Algorithm:**
  Computes single-source shortest paths. Edge weights are unsigned integers,
  so the nonnegativity precondition holds by construction.

- **Floyd–Warshall Algorithm:**
  Computes all-pairs shortest paths using dynamic programming and produces an
  [`AllPairs`] matrix over a dense node-index assignment captured at build
  time. The engine caches the matrix until the next structural mutation.

Both algorithms walk identical topology and weights, so for any pair of
nodes they agree on every finite distance, and a pair unreachable under one
is unreachable under the other.
*/

use crate::core::types::{GraphStore, NodeId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Computes single-source shortest paths from `source`.
///
/// # Returns
///
/// A map from node id to total path cost. Nodes that are unreachable from
/// the source are absent from the map; the source itself maps to `0`.
///
/// # Complexity
///
/// - Time: O(E log V)
/// - Space: O(V)
pub fn dijkstra(graph: &GraphStore, source: NodeId) -> HashMap<NodeId, u64> {
    let mut dist: HashMap<NodeId, u64> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if let Some(&current) = dist.get(&u) {
            // Stale entry from a superseded relaxation; skip it.
            if d > current {
                continue;
            }
        }
        for (v, w) in graph.outgoing(u) {
            let next = d.saturating_add(w);
            if dist.get(&v).is_none_or(|&best| next < best) {
                dist.insert(v, next);
                heap.push(Reverse((next, v)));
            }
        }
    }
    dist
}

/// All-pairs shortest-path distances over a fixed node ordering.
///
/// The ordering is captured when the matrix is built; the matrix is only
/// meaningful for the topology it was computed from, which the engine
/// guarantees by discarding it on every structural mutation.
#[derive(Debug, Clone)]
pub struct AllPairs {
    order: Vec<String>,
    index: HashMap<String, usize>,
    dist: Vec<Vec<Option<u64>>>,
}

impl AllPairs {
    /// Returns the number of nodes covered by the matrix.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the matrix covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the matrix covers a node with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the shortest directed distance from `from` to `to`.
    ///
    /// `None` means `to` is unreachable from `from`, or that either name is
    /// not covered by the matrix.
    pub fn distance(&self, from: &str, to: &str) -> Option<u64> {
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        self.dist[i][j]
    }

    /// Returns every node name `n` other than `to` with `dist(to, n)`
    /// strictly below `weight`, sorted lexicographically ascending.
    ///
    /// Returns `None` if `to` is not covered by the matrix; a covered node
    /// with nothing in range yields `Some` of an empty list. The two
    /// outcomes map to different protocol replies.
    pub fn closer_than(&self, weight: u64, to: &str) -> Option<Vec<String>> {
        let source = *self.index.get(to)?;
        let mut names: Vec<String> = self
            .order
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != source)
            .filter(|(j, _)| self.dist[source][*j].is_some_and(|d| d < weight))
            .map(|(_, name)| name.clone())
            .collect();
        names.sort_unstable();
        Some(names)
    }
}

/// Computes all-pairs shortest paths over the current topology.
///
/// Every node is assigned a dense index `0..N-1` in iteration order; the
/// matrix is initialised to `0` on the diagonal and unreachable elsewhere,
/// edges are folded in, and the triple loop relaxes through each
/// intermediate node in turn.
///
/// # Complexity
///
/// - Time: O(V^3)
/// - Space: O(V^2)
pub fn floyd_warshall(graph: &GraphStore) -> AllPairs {
    let order: Vec<String> = graph.nodes().map(|(_, name)| name.to_string()).collect();
    let dense: HashMap<NodeId, usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, (id, _))| (id, i))
        .collect();
    let n = order.len();

    let mut dist = vec![vec![None; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for (u, v, w) in graph.edges() {
        let ui = dense[&u];
        let vi = dense[&v];
        match dist[ui][vi] {
            Some(current) if w < current => dist[ui][vi] = Some(w),
            None => dist[ui][vi] = Some(w),
            _ => {}
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(dik), Some(dkj)) = (dist[i][k], dist[k][j]) {
                    let candidate = dik.saturating_add(dkj);
                    match dist[i][j] {
                        Some(dij) if candidate < dij => dist[i][j] = Some(candidate),
                        None => dist[i][j] = Some(candidate),
                        _ => {}
                    }
                }
            }
        }
    }

    let index = order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();
    AllPairs { order, index, dist }
}
