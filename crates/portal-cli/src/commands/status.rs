use std::collections::BTreeMap;

use serde::Serialize;

use portal_core::Collection;
use portal_core::display::format_last_updated;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    last_updated: String,
    syncing: bool,
    #[serde(flatten)]
    rows: BTreeMap<&'static str, u64>,
}

/// Handle `portal status`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut rows = BTreeMap::new();
    for collection in Collection::ALL {
        rows.insert(collection.table(), ctx.store.count(collection).await?);
    }

    let last_updated = ctx.store.last_updated().await?.map_or_else(
        || String::from("never"),
        |at| format_last_updated(&at, &ctx.config.display.date_format),
    );

    let report = StatusReport {
        last_updated,
        syncing: ctx.orchestrator.is_active(),
        rows,
    };
    output(&report, flags.format)
}
