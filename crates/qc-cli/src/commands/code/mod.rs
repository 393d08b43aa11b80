mod codings;
mod create;
mod list;
mod move_code;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CodeCommands;
use crate::context::AppContext;

/// Handle `qc code`.
pub async fn handle(
    action: &CodeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CodeCommands::List => list::run(ctx, flags).await,
        CodeCommands::Create { name } => create::run(name, ctx, flags).await,
        CodeCommands::Move { id, parent } => move_code::run(*id, *parent, ctx, flags).await,
        CodeCommands::Codings { id } => codings::run(*id, ctx, flags).await,
    }
}
