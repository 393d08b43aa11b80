use qc_db::repos::source::NewSource;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(new: &NewSource, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = ctx.service.create_source(new).await?;
    output(&source, flags.format)
}
