use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    number: i64,
    done: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let source = ctx
        .service
        .set_initial_coding_done(number, done)
        .await
        .with_context(|| format!("source {number} not found"))?;
    output(&source, flags.format)
}
