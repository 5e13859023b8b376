//! Cycle detection for dependency edge insertion.
//!
//! # Overview
//!
//! Dependency edges form a directed graph. A cycle would make some node its
//! own transitive dependency, so every candidate edge is checked before it
//! is installed and rejected with [`CycleError`] if it would close a loop.
//!
//! # Design
//!
//! - **Reject, don't warn**: unlike advisory linters, insertion here refuses
//!   the edge outright — the graph never holds a cyclic state.
//! - **Descendant-set membership**: adding `P → C` closes a cycle exactly
//!   when `P` is already reachable from `C`. The check reuses the closure
//!   walk in [`closure`], O(V+E) per insertion.
//! - **Self-loops short-circuit**: `P == C` is rejected before any walk; a
//!   childless node's descendant set cannot speak for it.
//!
//! [`closure`]: super::closure

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use super::closure;
use super::registry::{DepGraph, NodeName};

// ---------------------------------------------------------------------------
// CycleError
// ---------------------------------------------------------------------------

/// Error raised when a declared dependency would close a cycle.
///
/// Carries the rejected edge so callers can name the offending declaration.
/// This is the only failure the graph can produce, and it is always caused
/// by caller-supplied declarations, never by internal faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cyclic dependency: '{dependent}' -> '{dependency}' would make '{dependent}' depend on itself")]
pub struct CycleError {
    /// The declaring node (source of the rejected edge).
    pub dependent: NodeName,
    /// The declared dependency (target of the rejected edge).
    pub dependency: NodeName,
}

impl CycleError {
    /// Returns `true` if the rejected edge was a self-loop.
    pub fn is_self_loop(&self) -> bool {
        self.dependent == self.dependency
    }
}

// ---------------------------------------------------------------------------
// Core detection
// ---------------------------------------------------------------------------

/// Return `true` if installing the edge `dependent → dependency` would
/// create a cycle in the current graph.
///
/// The edge closes a cycle exactly when `dependent` is already in
/// `dependency`'s transitive-descendant set — then `dependent` would become
/// both an ancestor and a descendant of `dependency`. Self-loops are
/// rejected unconditionally.
pub fn would_create_cycle(graph: &DepGraph, dependent: &str, dependency: &str) -> bool {
    // Self-loop: a node can never depend on itself.
    if dependent == dependency {
        return true;
    }

    closure::descendants(graph, dependency).contains(dependent)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
