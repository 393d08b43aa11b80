use qc_db::updates::coding::CodingUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    snippet: Option<String>,
    start: Option<i64>,
    end: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut builder = CodingUpdateBuilder::new();
    if let Some(snippet) = snippet {
        builder = builder.snippet(snippet);
    }
    if start.is_some() {
        builder = builder.start_index(start);
    }
    if end.is_some() {
        builder = builder.end_index(end);
    }
    let update = builder.build();
    if update.is_empty() {
        anyhow::bail!("nothing to update: pass --snippet, --start or --end");
    }

    let coding = ctx.service.update_coding(id, update).await?;
    output(&coding, flags.format)
}
