use qc_server::widget::WidgetTreeResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Print the code forest in widget shape, or as an outline in table mode.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.service.code_tree().await?;
    output(&WidgetTreeResponse::from(response), flags.format)
}
