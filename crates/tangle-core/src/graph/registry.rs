//! Node registry and cycle-safe edge insertion.
//!
//! # Overview
//!
//! [`DepGraph`] owns every node in the dependency graph. A node's identity
//! is its name: the graph is an arena mapping [`NodeName`] to the node's set
//! of direct dependencies, so edges are plain name references back into the
//! same map and no cyclic ownership exists anywhere.
//!
//! # Data Model
//!
//! - `nodes: BTreeMap<NodeName, BTreeSet<NodeName>>` — name → direct
//!   dependencies (children). One entry per distinct name, created lazily on
//!   first mention as either a dependent or a dependency.
//! - `BTreeMap`/`BTreeSet` keep names in lexicographic order, so reports are
//!   deterministic without a separate sort pass.
//!
//! # Invariant
//!
//! The direct-dependency relation, closed transitively, stays a strict
//! partial order: no node is ever its own descendant. Every edge insertion
//! runs the cycle check in [`cycles`] before mutating, so the graph never
//! holds a cyclic state.
//!
//! # Usage
//!
//! ```rust
//! use tangle_core::graph::{DepGraph, render_all};
//!
//! let mut graph = DepGraph::new();
//! graph.add_direct_dependency("A", ["B", "C"])?;
//! graph.add_direct_dependency("B", ["C"])?;
//!
//! for line in render_all(&graph) {
//!     println!("{line}");
//! }
//! # Ok::<(), tangle_core::CycleError>(())
//! ```

#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
)]

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::cycles::{self, CycleError};

// ---------------------------------------------------------------------------
// NodeName
// ---------------------------------------------------------------------------

/// A node identity in the dependency graph.
///
/// Two nodes are equal iff their names are equal. Ordering is lexicographic
/// on the name, which is what puts report output in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Wrap a name. No validation: any non-tokenized string is a valid name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lets maps and sets keyed by [`NodeName`] be queried with a plain `&str`.
impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// DepGraph
// ---------------------------------------------------------------------------

/// A directed dependency graph with cycle-rejecting edge insertion.
///
/// Nodes are created once, on first mention, and live for the lifetime of
/// the graph; they are never deleted or renamed. Edges are added one at a
/// time and never removed.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    /// name → names the node depends on directly.
    nodes: BTreeMap<NodeName, BTreeSet<NodeName>>,
}

impl DepGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node with the given name, registering a new one if this is
    /// the first mention.
    ///
    /// Idempotent: repeated calls with the same name return the same
    /// identity, and the registry never holds two nodes with equal names.
    /// Never fails.
    pub fn get_or_create_node(&mut self, name: &str) -> NodeName {
        let node = NodeName::new(name);
        if !self.nodes.contains_key(name) {
            debug!(node = name, "registering node");
            self.nodes.insert(node.clone(), BTreeSet::new());
        }
        node
    }

    /// Attempt to add the single edge `dependent → dependency`.
    ///
    /// Both endpoints are resolved (or created) first. The edge is installed
    /// only if it would not close a cycle; the check runs strictly before
    /// the mutation, so a rejected insertion leaves the edge set untouched.
    ///
    /// Re-adding an existing edge is a no-op that succeeds.
    ///
    /// # Errors
    ///
    /// [`CycleError`] if `dependent` is already a transitive dependency of
    /// `dependency` (or the two are the same node).
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) -> Result<(), CycleError> {
        self.get_or_create_node(dependent);
        self.get_or_create_node(dependency);

        if cycles::would_create_cycle(self, dependent, dependency) {
            warn!(dependent, dependency, "rejecting edge: would close a cycle");
            return Err(CycleError {
                dependent: NodeName::new(dependent),
                dependency: NodeName::new(dependency),
            });
        }

        debug!(dependent, dependency, "adding edge");
        if let Some(children) = self.nodes.get_mut(dependent) {
            children.insert(NodeName::new(dependency));
        }
        Ok(())
    }

    /// Process one dependent with an ordered list of dependencies, adding
    /// one edge per dependency.
    ///
    /// Short-circuits on the first rejected edge. Edges installed earlier in
    /// the same batch stay installed — the batch is deliberately not atomic,
    /// and callers decide whether to treat the whole batch as void.
    ///
    /// # Errors
    ///
    /// The [`CycleError`] from the first rejected edge; later dependencies
    /// in the list are not attempted.
    pub fn add_direct_dependency<I, S>(&mut self, dependent: &str, dependencies: I) -> Result<(), CycleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get_or_create_node(dependent);
        for dependency in dependencies {
            self.add_dependency(dependent, dependency.as_ref())?;
        }
        Ok(())
    }

    /// Return `true` if a node with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// The direct dependencies of one node, sorted by name.
    ///
    /// Returns an empty set for unknown names.
    pub fn direct_dependencies(&self, name: &str) -> BTreeSet<&str> {
        self.nodes
            .get(name)
            .map(|children| children.iter().map(NodeName::as_str).collect())
            .unwrap_or_default()
    }

    /// Child set of a node, if registered. Traversal entry point for the
    /// closure walk.
    pub(crate) fn children(&self, name: &str) -> Option<&BTreeSet<NodeName>> {
        self.nodes.get(name)
    }

    /// All registered node names in lexicographic order.
    pub fn node_names(&self) -> impl Iterator<Item = &NodeName> {
        self.nodes.keys()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of direct-dependency edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(BTreeSet::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::closure::descendants;

    // -----------------------------------------------------------------------
    // NodeName identity
    // -----------------------------------------------------------------------

    #[test]
    fn node_name_equality_is_name_equality() {
        assert_eq!(NodeName::new("A"), NodeName::new("A"));
        assert_ne!(NodeName::new("A"), NodeName::new("B"));
    }

    #[test]
    fn node_name_orders_lexicographically() {
        let mut names = vec![NodeName::new("C"), NodeName::new("A"), NodeName::new("B")];
        names.sort();
        let sorted: Vec<&str> = names.iter().map(NodeName::as_str).collect();
        assert_eq!(sorted, ["A", "B", "C"]);
    }

    #[test]
    fn node_name_displays_as_bare_name() {
        assert_eq!(NodeName::new("lib-ssl").to_string(), "lib-ssl");
    }

    // -----------------------------------------------------------------------
    // get_or_create_node
    // -----------------------------------------------------------------------

    #[test]
    fn get_or_create_registers_once() {
        let mut graph = DepGraph::new();
        assert!(graph.is_empty());

        let first = graph.get_or_create_node("A");
        let second = graph.get_or_create_node("A");

        assert_eq!(first, second);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains("A"));
    }

    #[test]
    fn dependencies_are_registered_as_nodes() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("A", ["B", "C"]).expect("acyclic");

        // First mention as a dependency is enough to register.
        assert!(graph.contains("B"));
        assert!(graph.contains("C"));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn node_names_come_out_sorted() {
        let mut graph = DepGraph::new();
        for name in ["zeta", "alpha", "mid"] {
            graph.get_or_create_node(name);
        }
        let names: Vec<&str> = graph.node_names().map(NodeName::as_str).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    // -----------------------------------------------------------------------
    // add_dependency
    // -----------------------------------------------------------------------

    #[test]
    fn add_dependency_installs_edge() {
        let mut graph = DepGraph::new();
        graph.add_dependency("A", "B").expect("no cycle");

        assert!(graph.direct_dependencies("A").contains("B"));
        assert!(graph.direct_dependencies("B").is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn re_adding_existing_edge_is_noop() {
        let mut graph = DepGraph::new();
        graph.add_dependency("A", "B").expect("no cycle");
        graph.add_dependency("A", "B").expect("duplicate edge is fine");

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn self_dependency_rejected() {
        let mut graph = DepGraph::new();
        let err = graph.add_dependency("A", "A").expect_err("self-loop");

        assert_eq!(err.dependent.as_str(), "A");
        assert_eq!(err.dependency.as_str(), "A");
        assert!(graph.direct_dependencies("A").is_empty());
    }

    #[test]
    fn mutual_dependency_rejected_and_graph_unchanged() {
        let mut graph = DepGraph::new();
        graph.add_dependency("A", "B").expect("first edge ok");

        let err = graph.add_dependency("B", "A").expect_err("closes a cycle");
        assert_eq!(err.dependent.as_str(), "B");
        assert_eq!(err.dependency.as_str(), "A");

        // Only the original edge survives.
        assert!(graph.direct_dependencies("A").contains("B"));
        assert!(graph.direct_dependencies("B").is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn indirect_cycle_rejected() {
        let mut graph = DepGraph::new();
        graph.add_dependency("A", "B").expect("ok");
        graph.add_dependency("B", "C").expect("ok");
        graph.add_dependency("C", "D").expect("ok");

        assert!(graph.add_dependency("D", "A").is_err());
        assert_eq!(graph.edge_count(), 3);
    }

    // -----------------------------------------------------------------------
    // add_direct_dependency (batch)
    // -----------------------------------------------------------------------

    #[test]
    fn batch_with_no_dependencies_still_registers_dependent() {
        let mut graph = DepGraph::new();
        let empty: [&str; 0] = [];
        graph.add_direct_dependency("A", empty).expect("no edges to reject");

        assert!(graph.contains("A"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn batch_installs_edges_in_order() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("A", ["B", "C"]).expect("acyclic");

        let deps = graph.direct_dependencies("A");
        assert_eq!(deps.len(), 2);
        assert!(deps.contains("B"));
        assert!(deps.contains("C"));
    }

    #[test]
    fn batch_short_circuits_on_first_rejection() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("Y", ["A"]).expect("acyclic");

        // A -> X installs, A -> Y is rejected, A -> Z is never attempted.
        let err = graph
            .add_direct_dependency("A", ["X", "Y", "Z"])
            .expect_err("Y already depends on A");

        assert_eq!(err.dependent.as_str(), "A");
        assert_eq!(err.dependency.as_str(), "Y");

        assert!(graph.direct_dependencies("A").contains("X"), "earlier edge stays");
        assert!(!graph.direct_dependencies("A").contains("Y"));
        assert!(!graph.direct_dependencies("A").contains("Z"));
        // Z was never mentioned before the rejection, so it was never created.
        assert!(!graph.contains("Z"));
    }

    #[test]
    fn failed_batch_keeps_nodes_created_before_rejection() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("B", ["A"]).expect("acyclic");
        graph
            .add_direct_dependency("A", ["B"])
            .expect_err("mutual dependency");

        // Both endpoints of the rejected edge were resolved before the
        // check, and stay registered.
        assert!(graph.contains("A"));
        assert!(graph.contains("B"));
    }

    #[test]
    fn accepts_owned_and_borrowed_dependency_lists() {
        let mut graph = DepGraph::new();
        graph
            .add_direct_dependency("A", vec!["B".to_string(), "C".to_string()])
            .expect("owned strings");
        graph.add_direct_dependency("B", ["C"]).expect("borrowed strs");

        assert_eq!(graph.edge_count(), 3);
    }

    // -----------------------------------------------------------------------
    // Acyclicity invariant
    // -----------------------------------------------------------------------

    #[test]
    fn no_node_is_its_own_descendant_after_inserts() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("A", ["B", "C"]).expect("ok");
        graph.add_direct_dependency("B", ["C", "E"]).expect("ok");
        graph.add_direct_dependency("C", ["G"]).expect("ok");

        for name in ["A", "B", "C", "E", "G"] {
            assert!(
                !descendants(&graph, name).contains(name),
                "{name} must not be its own descendant"
            );
        }
    }

    #[test]
    fn unknown_name_queries_return_empty() {
        let graph = DepGraph::new();
        assert!(!graph.contains("ghost"));
        assert!(graph.direct_dependencies("ghost").is_empty());
    }
}
