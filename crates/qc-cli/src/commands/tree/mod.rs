mod apply;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TreeCommands;
use crate::context::AppContext;

/// Handle `qc tree`.
pub async fn handle(
    action: &TreeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TreeCommands::Show => show::run(ctx, flags).await,
        TreeCommands::Apply { input, dry_run } => apply::run(input, *dry_run, ctx, flags).await,
    }
}
