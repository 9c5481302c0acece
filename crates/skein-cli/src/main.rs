//! CLI frontend for the Skein scene tooling.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skein",
    about = "Skein — scene indexing and script-address tooling",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse all scene files and report diagnostics
    Check {
        /// Project directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// List indexed scene files
    List {
        /// Project directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the address suggestions reachable from a script
    Suggest {
        /// Project-absolute script path (e.g. /scripts/hero.script)
        script: String,

        /// Project directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start the Language Server Protocol server (for IDE integration)
    Lsp,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::List { dir, json } => commands::list::run(&dir, json),
        Commands::Suggest { script, dir, json } => commands::suggest::run(&dir, &script, json),
        Commands::Lsp => {
            // Exec the separate skein-lsp binary
            let status = std::process::Command::new("skein-lsp")
                .stdin(std::process::Stdio::inherit())
                .stdout(std::process::Stdio::inherit())
                .stderr(std::process::Stdio::inherit())
                .status();
            match status {
                Ok(s) if s.success() => Ok(()),
                Ok(s) => Err(format!("skein-lsp exited with {s}")),
                Err(_) => Err(
                    "skein-lsp binary not found. Install it with: cargo install --path crates/skein-lsp"
                        .into(),
                ),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
