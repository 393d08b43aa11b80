mod create;
mod get;
mod list;
mod review;
mod summary;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SourceCommands;
use crate::context::AppContext;

/// Handle `qc source`.
pub async fn handle(
    action: &SourceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SourceCommands::List => list::run(ctx, flags).await,
        SourceCommands::Create {
            number,
            name,
            author,
            publication_title,
            source_type,
            search_type,
            url,
        } => {
            let new = qc_db::repos::source::NewSource {
                author: author.clone(),
                publication_title: publication_title.clone(),
                source_type: source_type.clone(),
                search_type: search_type.clone(),
                url: url.clone(),
                ..qc_db::repos::source::NewSource::new(*number, name.as_str())
            };
            create::run(&new, ctx, flags).await
        }
        SourceCommands::Get { number } => get::run(*number, ctx, flags).await,
        SourceCommands::Update(args) => update::run(args, ctx, flags).await,
        SourceCommands::Review { number, undo } => review::run(*number, !*undo, ctx, flags).await,
        SourceCommands::Summary => summary::run(ctx, flags).await,
    }
}
