use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(number: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let detail = ctx
        .service
        .source_detail(number)
        .await
        .with_context(|| format!("source {number} not found"))?;
    output(&detail, flags.format)
}
