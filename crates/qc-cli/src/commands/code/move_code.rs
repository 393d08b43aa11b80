use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    parent: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let code = ctx
        .service
        .set_code_parent(id, parent)
        .await
        .with_context(|| match parent {
            Some(parent) => format!("failed to move code {id} under {parent}"),
            None => format!("failed to move code {id} to the root"),
        })?;
    output(&code, flags.format)
}
