use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod finance;
pub mod status;
pub mod sync;
pub mod terms;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => sync::handle(&args, ctx, flags).await,
        Commands::Status => status::handle(ctx, flags).await,
        Commands::Terms => terms::handle(ctx, flags).await,
        Commands::Finance => finance::handle(ctx, flags).await,
    }
}
