//! `tg report` — print the transitive-dependency report.
//!
//! Reads declaration lines from a file or stdin, builds the graph, and
//! prints one `<name> depends transitively on ...` line per node, in name
//! order. A cyclic declaration aborts the whole report.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use tangle_core::graph::{NodeName, descendants, render_all};

use crate::input;
use crate::output::{CliError, OutputMode, pretty_rule, render, render_error};

/// Arguments for `tg report`.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Declarations file ("A B C" lines). Reads stdin when omitted.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct NodeReport {
    name: NodeName,
    depends_transitively_on: BTreeSet<NodeName>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    nodes: Vec<NodeReport>,
    #[serde(skip)]
    lines: Vec<String>,
}

/// Execute `tg report`.
pub fn run_report(args: &ReportArgs, output: OutputMode, quiet: bool) -> anyhow::Result<()> {
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

    let payload = ReportOutput {
        nodes: graph
            .node_names()
            .map(|node| NodeReport {
                name: node.clone(),
                depends_transitively_on: descendants(&graph, node.as_str()),
            })
            .collect(),
        lines: render_all(&graph),
    };

    render(output, &payload, |report, w| {
        if output.is_pretty() && !quiet {
            writeln!(w, "Dependency report ({} nodes)", report.nodes.len())?;
            pretty_rule(w)?;
        }
        for line in &report.lines {
            writeln!(w, "{line}")?;
        }
        Ok(())
    })
}
