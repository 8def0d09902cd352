pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sealtext", version)]
#[command(about = "Seal and open text messages between P-256 key holders")]
pub struct Args {
    /// Path to the sealtext config directory (defaults to ~/.sealtext)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides config.toml
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
