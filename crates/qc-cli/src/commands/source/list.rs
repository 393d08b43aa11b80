use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = flags.limit_or(ctx.config.general.default_limit);
    let sources = ctx.service.list_sources(limit).await?;
    output(&sources, flags.format)
}
