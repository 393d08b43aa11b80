use anyhow::Context;
use qc_server::AppState;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `qc serve`.
pub async fn handle(args: &ServeArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut server = ctx.config.server.clone();
    if let Some(bind) = &args.bind {
        server.bind.clone_from(bind);
    }
    let addr = server.bind_addr()?;

    if ctx.config.auth.is_enforced() {
        tracing::info!(
            allowed = ctx.config.auth.allowed_emails.len(),
            header = %ctx.config.auth.identity_header,
            "identity allow-list enabled"
        );
    } else {
        tracing::warn!("auth.allowed_emails is empty; the API is open to every caller");
    }

    if !flags.quiet {
        eprintln!("qualcode API listening on http://{addr}");
    }

    let state = AppState::new(ctx.service, ctx.config.auth)
        .with_list_limit(ctx.config.general.api_list_limit);
    qc_server::serve(state, addr)
        .await
        .context("qualcode server stopped with an error")
}
