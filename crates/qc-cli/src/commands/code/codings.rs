use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .service
        .code_codings(id)
        .await
        .with_context(|| format!("code {id} not found"))?;
    output(&response, flags.format)
}
