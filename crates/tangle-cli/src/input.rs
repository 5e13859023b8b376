//! Declaration-line input: tokenizing `"A B C"` lines and building the graph.
//!
//! A declaration line names a dependent followed by its dependencies, in
//! order, separated by whitespace. `"A B C"` means A depends on B and C.
//! Blank lines and `#` comments are skipped. Everything past tokenization is
//! the core's concern.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use tangle_core::graph::{CycleError, DepGraph};

/// One parsed declaration: a dependent and its dependencies, in given order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub dependent: String,
    pub dependencies: Vec<String>,
}

/// Tokenize one line. Blank lines and `#` comments yield `None`.
///
/// A dependent with no dependencies is a valid declaration — it still
/// registers the node.
pub fn parse_line(line: &str) -> Option<Declaration> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace().map(str::to_string);
    let dependent = tokens.next()?;
    Some(Declaration {
        dependent,
        dependencies: tokens.collect(),
    })
}

/// Parse every declaration in `text`, skipping blanks and comments.
pub fn parse_declarations(text: &str) -> Vec<Declaration> {
    text.lines().filter_map(parse_line).collect()
}

/// Read declarations from a file, or from stdin when no path is given.
///
/// # Errors
///
/// Returns an error if the file (or stdin) cannot be read.
pub fn read_declarations(path: Option<&Path>) -> anyhow::Result<Vec<Declaration>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read declarations from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read declarations from stdin")?;
            buf
        }
    };
    Ok(parse_declarations(&text))
}

/// Build a graph from declarations, stopping at the first cyclic one.
///
/// # Errors
///
/// The [`CycleError`] from the first rejected edge. The partially built
/// graph is dropped — the CLI treats the whole input as void.
pub fn build_graph(declarations: &[Declaration]) -> Result<DepGraph, CycleError> {
    let mut graph = DepGraph::new();
    for declaration in declarations {
        graph.add_direct_dependency(&declaration.dependent, &declaration.dependencies)?;
    }
    Ok(graph)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
