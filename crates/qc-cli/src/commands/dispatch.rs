use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, ctx, flags).await,
        Commands::Code { action } => commands::code::handle(&action, &ctx, flags).await,
        Commands::Coding { action } => commands::coding::handle(&action, &ctx, flags).await,
        Commands::Source { action } => commands::source::handle(&action, &ctx, flags).await,
        Commands::Tree { action } => commands::tree::handle(&action, &ctx, flags).await,
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
