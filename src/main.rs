use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

mod model;
mod registry;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "opkernel-doc")]
#[command(about = "Operator kernel documentation generator", long_about = None)]
struct Cli {
    /// Registry snapshot (registry.json) to document.
    #[arg(long)]
    registry: PathBuf,

    /// Output markdown file path.
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load + validate the registry snapshot.
    let snapshot = registry::Snapshot::load(&cli.registry)?;

    // 2) Render the full document in memory; nothing is written on failure.
    let doc = render::render_markdown(&snapshot);

    // 3) Write.
    let out = match cli.output_path {
        Some(path) => path,
        None => default_output_path()?,
    };
    std::fs::write(&out, doc).with_context(|| format!("write {}", out.display()))?;
    println!("Wrote {}", out.display());

    Ok(())
}

/// Default: `OperatorKernels.md` next to the executable.
fn default_output_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locate current executable")?;
    let dir = exe.parent().map(|p| p.to_path_buf()).unwrap_or_default();
    Ok(dir.join("OperatorKernels.md"))
}
