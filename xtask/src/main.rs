//! Build automation tasks, run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use mdsweep::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "mdsweep build tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages from the CLI definitions
    Man {
        /// Directory that receives the generated pages
        #[arg(long, default_value = "target/man")]
        out_dir: std::path::PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

/// Render one page per command: mdsweep.1, mdsweep-convert.1, ...
fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut root = Cli::command();
    root.build();

    render_page(&root, "mdsweep", out_dir)?;
    for sub in root.get_subcommands() {
        if sub.get_name() == "help" {
            continue;
        }
        let name = format!("mdsweep-{}", sub.get_name());
        render_page(sub, &name, out_dir)?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn render_page(cmd: &clap::Command, name: &str, out_dir: &Path) -> Result<()> {
    let man = Man::new(cmd.clone().name(name.to_string()));
    let mut buf = Vec::new();
    man.render(&mut buf)
        .with_context(|| format!("failed to render man page for {}", name))?;

    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
