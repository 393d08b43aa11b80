use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    source_id: i64,
    code_id: i64,
    snippet: &str,
    start: Option<i64>,
    end: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        anyhow::bail!("--end ({end}) must not be before --start ({start})");
    }

    let coding = ctx
        .service
        .create_coding(source_id, code_id, snippet, start, end)
        .await?;
    output(&coding, flags.format)
}
