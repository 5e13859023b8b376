//! The dependency graph: node registry, cycle-safe edges, closure reporting.
//!
//! ## Submodules
//!
//! - [`registry`] — Node identity, the name-keyed arena of child sets, and
//!   edge insertion (single and batch).
//! - [`cycles`] — The insertion-time cycle check and the error it raises.
//! - [`closure`] — Transitive-descendant computation.
//! - [`render`] — The `<name> depends transitively on ...` report lines.

pub mod closure;
pub mod cycles;
pub mod registry;
pub mod render;

pub use closure::descendants;
pub use cycles::{CycleError, would_create_cycle};
pub use registry::{DepGraph, NodeName};
pub use render::{render_all, render_node};
