use serde::Serialize;

use portal_core::entities::Term;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TermRow {
    code: String,
    label: String,
}

impl From<Term> for TermRow {
    fn from(term: Term) -> Self {
        Self {
            code: term.code,
            label: term.label,
        }
    }
}

/// Handle `portal terms`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let terms = ctx.store.known_terms().await?;
    if terms.is_empty() && !flags.quiet {
        tracing::info!("no terms stored yet; run `portal sync terms`");
    }
    let rows: Vec<TermRow> = terms.into_iter().map(TermRow::from).collect();
    output(&rows, flags.format)
}
