use std::io::Read;

use anyhow::Context;
use serde::Serialize;

use qc_core::session::EditSession;
use qc_core::tree::{self, ParentUpdate, TreeNode};
use qc_server::widget::{WidgetNode, WidgetSaveResponse, WidgetTree};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{TableOptions, Tabular, output, views};

#[derive(Debug, Serialize)]
struct DryRunResponse {
    updates: Vec<ParentUpdate>,
}

impl Tabular for DryRunResponse {
    fn to_table(&self, options: TableOptions) -> String {
        if self.updates.is_empty() {
            return String::from("no parent changes");
        }
        format!(
            "would move {} code(s)\n{}",
            self.updates.len(),
            views::rows(&self.updates, options)
        )
    }
}

pub async fn run(
    input: &str,
    dry_run: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let edited = read_tree(input)?;

    let mut session = EditSession::load(&ctx.service)
        .await
        .context("failed to load codes")?;

    if dry_run {
        let updates = tree::plan_tree_save(session.codes(), &edited)?;
        return output(&DryRunResponse { updates }, flags.format);
    }

    session.apply_widget_tree(edited);
    let report = session
        .save(&ctx.service)
        .await
        .context("failed to save the code tree")?;

    let codes = session.codes();
    let response = WidgetSaveResponse {
        report,
        tree: session.tree().iter().cloned().map(WidgetNode::from).collect(),
        orphans: tree::orphans(codes),
    };
    output(&response, flags.format)
}

fn read_tree(input: &str) -> anyhow::Result<Vec<TreeNode>> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read tree from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };
    parse_tree(&raw)
}

fn parse_tree(raw: &str) -> anyhow::Result<Vec<TreeNode>> {
    // `qc tree show` output wraps the forest in `{tree, orphans}`; accept it as-is.
    let value: serde_json::Value = serde_json::from_str(raw).context("tree is not valid JSON")?;
    let value = match value {
        serde_json::Value::Object(mut map) if map.contains_key("tree") => map
            .remove("tree")
            .unwrap_or(serde_json::Value::Array(Vec::new())),
        other => other,
    };
    let tree: WidgetTree =
        serde_json::from_value(value).context("tree does not match the widget shape")?;
    Ok(tree.into_forest())
}
