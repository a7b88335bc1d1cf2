use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tsf", about = concat!("[/] tagsift v", env!("CARGO_PKG_VERSION"), " - type, rank, jump"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File to open in the interactive panel
    pub file: Option<PathBuf>,

    /// Load tagsift.toml from a different directory
    #[arg(short = 'C', long = "config-dir", global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a file's symbols in ranked order
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// File to extract symbols from
    pub file: PathBuf,

    /// Query to rank against; omitted means document order
    pub query: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
