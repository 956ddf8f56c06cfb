use clap::Parser;
use std::path::PathBuf;

/// Outer argument surface. The command language itself is read line by
/// line from stdin once the session starts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where to keep the task save file
    #[arg(long, value_name = "PATH")]
    pub save_file: Option<PathBuf>,

    /// Skip the startup banner
    #[arg(long)]
    pub plain: bool,
}
