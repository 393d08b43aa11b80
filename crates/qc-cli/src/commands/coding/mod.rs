mod create;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CodingCommands;
use crate::context::AppContext;

/// Handle `qc coding`.
pub async fn handle(
    action: &CodingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CodingCommands::Create {
            source,
            code,
            snippet,
            start,
            end,
        } => create::run(*source, *code, snippet, *start, *end, ctx, flags).await,
        CodingCommands::Update {
            id,
            snippet,
            start,
            end,
        } => update::run(*id, snippet.clone(), *start, *end, ctx, flags).await,
        CodingCommands::List { code, source } => list::run(*code, *source, ctx, flags).await,
    }
}
