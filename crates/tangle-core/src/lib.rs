//! tangle-core library.
//!
//! Builds a directed dependency graph from pairwise "depends-on"
//! declarations, rejects any declaration that would introduce a cycle, and
//! reports each node's transitive dependencies.
//!
//! # Conventions
//!
//! - **Errors**: library functions return typed errors (`thiserror`);
//!   binaries wrap them in `anyhow::Result` at command boundaries.
//! - **Logging**: use `tracing` macros (`debug!`, `warn!`).

pub mod graph;

pub use graph::{CycleError, DepGraph, NodeName};
