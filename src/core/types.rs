/*!
# Graphwire Graph Store

This module defines the in-memory graph held by the engine. The `GraphStore`
struct is a wrapper around petgraph's `StableGraph` that keys nodes by name
and enforces the structural rules of the store:

- Node names are unique; identity and equality are by name alone.
- Edges are directed, carry a non-negative integer weight, and at most one
  edge exists per ordered pair of endpoints.
- Re-adding an existing edge lowers its weight in place when the new weight
  is strictly smaller, and changes nothing otherwise.
- Removing a node removes every edge whose source or target is that node.

`GraphStore` is plain data: it does no locking and knows nothing about the
cached all-pairs matrix. Those concerns live in `graphwire::core::engine`.
*/

use petgraph::Directed;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{NodeIndex, StableGraph as PetGraph};
use petgraph::visit::{IntoEdgeReferences, IntoNodeReferences};
use std::collections::HashMap;

/// Wrapper for `NodeIndex` that keeps petgraph types out of the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    /// Returns the numeric part of the node's index.
    pub fn index(&self) -> usize {
        self.0.index()
    }
    /// Creates a new `NodeId` from a `NodeIndex`.
    pub(crate) fn new(index: NodeIndex) -> Self {
        Self(index)
    }
}

/// Outcome of [`GraphStore::upsert_edge`] when both endpoints exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeUpsert {
    /// No edge existed for the ordered pair; one was inserted.
    Inserted,
    /// An edge existed and the new weight was strictly smaller; the stored
    /// weight was lowered in place.
    Lowered,
    /// An edge existed and the new weight was not an improvement.
    Unchanged,
}

impl EdgeUpsert {
    /// Returns true if the upsert changed the stored topology or weights.
    pub fn changed_state(&self) -> bool {
        !matches!(self, EdgeUpsert::Unchanged)
    }
}

/// A directed weighted graph keyed by node name.
///
/// Using `StableGraph` keeps node indices valid across removals, and its
/// `remove_node` drops incident edges in both directions, which is exactly
/// the node-removal rule of the store.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    inner: PetGraph<String, u64, Directed>,
    names: HashMap<String, NodeId>,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the store.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Returns the number of edges in the store.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns true if the store contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Looks up the id of a node by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Returns true if a node with the given name exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Returns the name of a node, if it exists.
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.inner.node_weight(node.0).map(String::as_str)
    }

    /// Inserts a node with the given name.
    ///
    /// Returns `true` if the node was inserted, or `false` if a node with
    /// that name was already present (the store is left unchanged).
    pub fn insert_node(&mut self, name: &str) -> bool {
        if self.names.contains_key(name) {
            return false;
        }
        let id = NodeId::new(self.inner.add_node(name.to_string()));
        self.names.insert(name.to_string(), id);
        true
    }

    /// Inserts or improves the edge `(from, to)`.
    ///
    /// Returns `None` if either endpoint is missing. Otherwise the edge is
    /// inserted when absent, or its weight lowered in place when `weight` is
    /// strictly smaller than the stored one; a non-improving weight leaves
    /// the store unchanged. The stored weight is therefore the minimum
    /// weight ever observed for the ordered pair.
    pub fn upsert_edge(&mut self, from: &str, to: &str, weight: u64) -> Option<EdgeUpsert> {
        let source = self.node_id(from)?;
        let target = self.node_id(to)?;
        match self.inner.find_edge(source.0, target.0) {
            Some(edge) => {
                let current = self.inner.edge_weight_mut(edge)?;
                if weight < *current {
                    *current = weight;
                    Some(EdgeUpsert::Lowered)
                } else {
                    Some(EdgeUpsert::Unchanged)
                }
            }
            None => {
                self.inner.add_edge(source.0, target.0, weight);
                Some(EdgeUpsert::Inserted)
            }
        }
    }

    /// Removes a node and every edge incident to it.
    ///
    /// Returns `true` if the node existed.
    pub fn remove_node(&mut self, name: &str) -> bool {
        match self.names.remove(name) {
            Some(id) => {
                self.inner.remove_node(id.0);
                true
            }
            None => false,
        }
    }

    /// Removes the edge `(from, to)` if present.
    ///
    /// Returns `None` if either endpoint is missing. Otherwise returns
    /// `Some(true)` if an edge was removed and `Some(false)` if no edge
    /// existed for the ordered pair; absence is not an error.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Option<bool> {
        let source = self.node_id(from)?;
        let target = self.node_id(to)?;
        match self.inner.find_edge(source.0, target.0) {
            Some(edge) => {
                self.inner.remove_edge(edge);
                Some(true)
            }
            None => Some(false),
        }
    }

    /// Returns the weight of the edge `(from, to)`, if such an edge exists.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<u64> {
        let source = self.node_id(from)?;
        let target = self.node_id(to)?;
        let edge = self.inner.find_edge(source.0, target.0)?;
        self.inner.edge_weight(edge).copied()
    }

    /// Returns an iterator over all nodes and their names.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.inner
            .node_references()
            .map(|(idx, name)| (NodeId::new(idx), name.as_str()))
    }

    /// Returns an iterator over all edges as `(source, target, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, u64)> + '_ {
        self.inner.edge_references().map(|edge| {
            (
                NodeId::new(edge.source()),
                NodeId::new(edge.target()),
                *edge.weight(),
            )
        })
    }

    /// Returns an iterator over outgoing edges of a node as `(target, weight)`.
    pub fn outgoing(&self, source: NodeId) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.inner
            .edges(source.0)
            .map(|edge| (NodeId::new(edge.target()), *edge.weight()))
    }
}
