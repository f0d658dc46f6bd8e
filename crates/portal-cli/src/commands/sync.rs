use std::collections::BTreeMap;

use serde::Serialize;

use portal_core::display::format_last_updated;
use portal_core::{Collection, SyncKind};

use crate::cli::{GlobalFlags, SyncArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SyncReport {
    requested: Vec<String>,
    outcome: &'static str,
    last_updated: Option<String>,
    #[serde(flatten)]
    rows: BTreeMap<&'static str, u64>,
}

/// Handle `portal sync`.
///
/// Subscribes before enqueueing so the cycle's events cannot be missed, then
/// waits until the orchestrator is idle again.
pub async fn handle(args: &SyncArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut events = ctx.orchestrator.subscribe();

    let requested = if args.kinds.is_empty() {
        ctx.orchestrator.request_all()?;
        SyncKind::FULL_REFRESH.to_vec()
    } else {
        warn_if_no_terms(&args.kinds, ctx).await?;
        ctx.orchestrator.request_many(&args.kinds)?;
        args.kinds.clone()
    };

    let Some(failed) = ctx.orchestrator.wait_idle(&mut events).await else {
        anyhow::bail!("sync worker stopped before completing");
    };

    let mut rows = BTreeMap::new();
    for collection in touched_collections(&requested) {
        rows.insert(collection.table(), ctx.store.count(collection).await?);
    }
    let last_updated = ctx
        .store
        .last_updated()
        .await?
        .map(|at| format_last_updated(&at, &ctx.config.display.date_format));
    let report = SyncReport {
        requested: requested.iter().map(ToString::to_string).collect(),
        outcome: if failed { "failed" } else { "completed" },
        last_updated,
        rows,
    };
    if !flags.quiet || failed {
        output(&report, flags.format)?;
    }

    if failed {
        anyhow::bail!("sync failed; run `portal sync` again to retry");
    }
    Ok(())
}

/// Fan-out kinds fetch once per stored term; without terms they fetch nothing.
async fn warn_if_no_terms(kinds: &[SyncKind], ctx: &AppContext) -> anyhow::Result<()> {
    let fans_out = kinds.iter().any(|kind| kind.fans_out_over_terms());
    if fans_out
        && !kinds.contains(&SyncKind::Terms)
        && ctx.store.term_codes().await?.is_empty()
    {
        tracing::warn!("no terms stored yet; grades and courses need `portal sync terms` first");
    }
    Ok(())
}

/// Collections written by `kinds`, each once, in table order.
fn touched_collections(kinds: &[SyncKind]) -> Vec<Collection> {
    Collection::ALL
        .into_iter()
        .filter(|collection| {
            kinds
                .iter()
                .any(|kind| kind.collections().contains(collection))
        })
        .collect()
}
