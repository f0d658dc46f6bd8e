use serde::Serialize;

use portal_core::display::format_charge_total;
use portal_core::entities::FinanceCharge;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ChargeRow {
    due_date: String,
    description: String,
    term: String,
    amount: String,
}

#[derive(Debug, Serialize)]
struct FinanceReport {
    total: String,
    charges: Vec<ChargeRow>,
}

fn charge_row(charge: FinanceCharge, prefix: &str) -> ChargeRow {
    ChargeRow {
        due_date: charge.due_date,
        description: charge.description,
        term: charge.term.unwrap_or_default(),
        amount: format_charge_total(charge.amount, prefix),
    }
}

/// Handle `portal finance`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let prefix = ctx.config.display.currency_prefix.as_str();
    let charges: Vec<FinanceCharge> = ctx.store.read_all().await?;
    let total = format_charge_total(ctx.store.finance_total().await?, prefix);
    let charges = charges
        .into_iter()
        .map(|charge| charge_row(charge, prefix))
        .collect::<Vec<_>>();

    match flags.format {
        OutputFormat::Table => {
            if !charges.is_empty() {
                output(&charges, flags.format)?;
            }
            println!("Total: {total}");
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => {
            output(&FinanceReport { total, charges }, flags.format)
        }
    }
}
