//! Transitive-descendant computation.
//!
//! # Overview
//!
//! Given a node, compute the set of all nodes reachable by following one or
//! more direct-dependency edges. The walk re-reads the graph from scratch on
//! every call — there is no memoization — so the result always reflects the
//! edge set at call time.
//!
//! # Design
//!
//! - **Iterative worklist**: a `VecDeque` seeded with the node's direct
//!   children; each newly visited node pushes its own children. O(V+E).
//! - **Visited set doubles as the result**: a `BTreeSet` deduplicates and
//!   keeps the result sorted by name, so reports need no sort pass.
//! - **Owned snapshot**: the returned set shares nothing with the graph;
//!   edges added later never mutate a previously returned set.
//!
//! Termination does not depend on the graph being acyclic — the visited set
//! bounds the walk even on a corrupted graph — but edge insertion keeps the
//! acyclicity invariant regardless, and the tests pin it.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::{BTreeSet, VecDeque};

use super::registry::{DepGraph, NodeName};

/// All nodes reachable from `name` via one or more dependency edges,
/// duplicate-free and sorted by name.
///
/// The starting node itself is not a member unless the graph somehow reaches
/// it again — which edge insertion rules out. Unknown names yield an empty
/// set.
pub fn descendants(graph: &DepGraph, name: &str) -> BTreeSet<NodeName> {
    let mut all: BTreeSet<NodeName> = BTreeSet::new();
    let mut work: VecDeque<NodeName> = graph
        .children(name)
        .map(|children| children.iter().cloned().collect())
        .unwrap_or_default();

    while let Some(node) = work.pop_front() {
        if !all.insert(node.clone()) {
            continue;
        }
        if let Some(children) = graph.children(node.as_str()) {
            work.extend(children.iter().cloned());
        }
    }

    all
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
