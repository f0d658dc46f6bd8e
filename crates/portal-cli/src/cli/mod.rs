use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::{Commands, SyncArgs};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `portal` binary.
#[derive(Debug, Parser)]
#[command(name = "portal", version, about = "Academic portal sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}
