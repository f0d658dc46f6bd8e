use clap::{Args, Subcommand};

use portal_core::SyncKind;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mirror resources from the portal into the local store
    Sync(SyncArgs),
    /// Row counts, last update, and sync activity
    Status,
    /// List known academic terms
    Terms,
    /// Outstanding finance charges and their total
    Finance,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Resources to sync (schedule, exam, finance, grades, terms, course, account).
    /// Syncs everything when omitted.
    #[arg(value_parser = parse_kind)]
    pub kinds: Vec<SyncKind>,
}

fn parse_kind(value: &str) -> Result<SyncKind, String> {
    value.parse().map_err(|e: portal_core::CoreError| e.to_string())
}
