//! Report rendering: one line per node, descendants comma-joined.
//!
//! Pure read-only formatting over the graph. The line shape is
//! `<name> depends transitively on <comma-joined sorted descendants>`; a
//! node with no descendants renders with an empty suffix after `"on "`.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use super::closure;
use super::registry::{DepGraph, NodeName};

/// Render the report line for a single node.
///
/// Descendants come out sorted and duplicate-free because the closure walk
/// returns a name-ordered set.
pub fn render_node(graph: &DepGraph, name: &str) -> String {
    let all = closure::descendants(graph, name);
    let joined = all
        .iter()
        .map(NodeName::as_str)
        .collect::<Vec<_>>()
        .join(",");
    format!("{name} depends transitively on {joined}")
}

/// Render one line per registered node, in name order.
pub fn render_all(graph: &DepGraph) -> Vec<String> {
    graph
        .node_names()
        .map(|node| render_node(graph, node.as_str()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_renders_nothing() {
        let graph = DepGraph::new();
        assert!(render_all(&graph).is_empty());
    }

    #[test]
    fn node_without_descendants_renders_empty_suffix() {
        let mut graph = DepGraph::new();
        graph.get_or_create_node("G");
        assert_eq!(render_node(&graph, "G"), "G depends transitively on ");
    }

    #[test]
    fn descendants_are_comma_joined_and_sorted() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("A", ["C", "B"]).expect("acyclic");
        graph.add_direct_dependency("B", ["D"]).expect("acyclic");

        assert_eq!(render_node(&graph, "A"), "A depends transitively on B,C,D");
    }

    #[test]
    fn lines_come_out_in_name_order() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("B", ["C"]).expect("acyclic");
        graph.add_direct_dependency("A", ["B"]).expect("acyclic");

        let lines = render_all(&graph);
        assert_eq!(
            lines,
            [
                "A depends transitively on B,C",
                "B depends transitively on C",
                "C depends transitively on ",
            ]
        );
    }

    #[test]
    fn rendering_does_not_mutate_the_graph() {
        let mut graph = DepGraph::new();
        graph.add_direct_dependency("A", ["B"]).expect("acyclic");

        let before_nodes = graph.len();
        let before_edges = graph.edge_count();
        let _ = render_all(&graph);

        assert_eq!(graph.len(), before_nodes);
        assert_eq!(graph.edge_count(), before_edges);
    }
}
