use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Render Markdown projects to HTML")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render a Markdown file to HTML. Front matter is left out.
    Render { file: PathBuf },
    /// Print a file's front matter and body separately.
    Split {
        file: PathBuf,
        /// Print a JSON object with `metadata` and `content` keys.
        #[arg(long)]
        json: bool,
    },
    /// Load one project through the catalog and print its HTML.
    Load {
        id: String,
        #[command(flatten)]
        source: Source,
    },
    /// Scan the project files and list the resulting catalog.
    Scan {
        #[command(flatten)]
        source: Source,
    },
}

/// Where the catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct Source {
    /// Read documents from this directory instead of the configured storage.
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}
