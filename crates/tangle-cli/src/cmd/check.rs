//! `tg check` — validate declarations for cycles without printing a report.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::input;
use crate::output::{CliError, OutputMode, render, render_error};

/// Arguments for `tg check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Declarations file ("A B C" lines). Reads stdin when omitted.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    ok: bool,
    nodes: usize,
    edges: usize,
}

/// Execute `tg check`. Exit status is the result: zero iff every
/// declaration is acyclic.
pub fn run_check(args: &CheckArgs, output: OutputMode, quiet: bool) -> anyhow::Result<()> {
    let declarations = match input::read_declarations(args.file.as_deref()) {
        Ok(declarations) => declarations,
        Err(e) => {
            render_error(output, &CliError::new(e.to_string()))?;
            return Err(e);
        }
    };

    let graph = match input::build_graph(&declarations) {
        Ok(graph) => graph,
        Err(e) => {
            render_error(
                output,
                &CliError::with_details(
                    e.to_string(),
                    "remove or reorder the offending declaration",
                    "cycle_detected",
                ),
            )?;
            anyhow::bail!("{e}");
        }
    };

    let payload = CheckOutput {
        ok: true,
        nodes: graph.len(),
        edges: graph.edge_count(),
    };

    render(output, &payload, |summary, w| {
        if quiet {
            return Ok(());
        }
        writeln!(w, "✓ no cycles: {} nodes, {} edges", summary.nodes, summary.edges)
    })
}
