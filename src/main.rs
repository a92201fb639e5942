use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use larch::report;

/// Type check a Larch source file.
#[derive(Parser)]
#[command(name = "larch", version, about)]
struct Cli {
    /// Source file to check
    file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let diagnostics = larch::check_source(&source)?;

    if diagnostics.is_empty() {
        println!("no type errors found");
        return Ok(());
    }

    for diagnostic in &diagnostics {
        eprintln!("{}\n", report::render(diagnostic, &source));
    }
    process::exit(1);
}
