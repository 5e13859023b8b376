#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tangle: cycle-rejecting dependency graph reporter",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (pretty, text, json).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, environment, and TTY state.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Report transitive dependencies for every node",
        long_about = "Read dependency declarations and print one closure line per node, sorted by name.",
        after_help = "EXAMPLES:\n    # Report from a declarations file\n    tg report deps.txt\n\n    # Report from stdin\n    printf 'A B C\\nB C E\\n' | tg report\n\n    # Emit machine-readable output\n    tg report deps.txt --json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        about = "Check declarations for cycles",
        long_about = "Read dependency declarations and exit non-zero if any would close a cycle.",
        after_help = "EXAMPLES:\n    # Check a declarations file\n    tg check deps.txt\n\n    # Quiet check in a script (exit status only)\n    tg check deps.txt --quiet"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    tg completions bash\n\n    # Generate zsh completions\n    tg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TANGLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "tangle_core=debug,tg=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("TANGLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    match cli.command {
        Commands::Report(ref args) => cmd::report::run_report(args, output, cli.quiet),
        Commands::Check(ref args) => cmd::check::run_check(args, output, cli.quiet),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
