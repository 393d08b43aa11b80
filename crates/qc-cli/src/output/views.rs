//! Table views for qualcode records.
//!
//! Lists print one row per record with columns chosen per type. Single
//! records print as field/value pairs, and responses that bundle a record
//! with its codings print the record followed by a codings table.

use qc_core::entities::{Code, Coding, Source};
use qc_core::ids::CodeId;
use qc_core::responses::{
    CodeCodingsResponse, CodeTreeResponse, CodingWithCode, CodingWithSource, ParentUpdateFailure,
    ParentUpdateReport, ReviewSummary, SourceDetail,
};
use qc_core::tree::{ParentUpdate, TreeNode};
use qc_server::widget::{WidgetNode, WidgetSaveResponse, WidgetTreeResponse};

use super::Tabular;
use super::table::{self, TableOptions};

/// A record that prints as one table row.
pub trait Row {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl<T: Row> Tabular for Vec<T> {
    fn to_table(&self, options: TableOptions) -> String {
        rows(self, options)
    }
}

/// Table of `items`, or a placeholder when there are none.
pub fn rows<T: Row>(items: &[T], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    let cells = items.iter().map(Row::cells).collect::<Vec<_>>();
    table::render_columns(T::HEADERS, &cells, options)
}

fn section(title: &str, body: &str) -> String {
    format!("\n{title}\n{body}")
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn parent_cell(parent_id: Option<CodeId>) -> String {
    parent_id.map_or_else(|| String::from("root"), |id| id.to_string())
}

fn span_cell(coding: &Coding) -> String {
    match (coding.start_index, coding.end_index) {
        (Some(start), Some(end)) => format!("{start}..{end}"),
        (Some(start), None) => format!("{start}.."),
        (None, Some(end)) => format!("..{end}"),
        (None, None) => String::from("-"),
    }
}

/// Snippets keep their text on one line in tables.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl Row for Code {
    const HEADERS: &'static [&'static str] = &["id", "name", "parent", "codings"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            parent_cell(self.parent_id),
            self.coding_count.to_string(),
        ]
    }
}

impl Row for Source {
    const HEADERS: &'static [&'static str] = &["number", "name", "author", "type", "reviewed"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.source_number.to_string(),
            self.source_name.clone(),
            or_dash(self.author.as_deref()),
            or_dash(self.source_type.as_deref()),
            yes_no(self.initial_coding_done).to_string(),
        ]
    }
}

impl Row for Coding {
    const HEADERS: &'static [&'static str] = &["id", "code", "source", "span", "snippet"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code_id.to_string(),
            self.source_id.to_string(),
            span_cell(self),
            one_line(&self.snippet),
        ]
    }
}

/// Codings of one source, labelled by code.
impl Row for CodingWithCode {
    const HEADERS: &'static [&'static str] = &["id", "code", "span", "snippet"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.coding.id.to_string(),
            self.code_name.clone(),
            span_cell(&self.coding),
            one_line(&self.coding.snippet),
        ]
    }
}

/// Codings of one code, labelled by source.
impl Row for CodingWithSource {
    const HEADERS: &'static [&'static str] = &["id", "source", "name", "snippet"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.coding.id.to_string(),
            self.source.source_number.to_string(),
            self.source.source_name.clone(),
            one_line(&self.coding.snippet),
        ]
    }
}

impl Row for ParentUpdate {
    const HEADERS: &'static [&'static str] = &["id", "parent"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), parent_cell(self.parent_id)]
    }
}

impl Row for ParentUpdateFailure {
    const HEADERS: &'static [&'static str] = &["id", "error"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.error.clone()]
    }
}

impl Tabular for Code {
    fn to_table(&self, options: TableOptions) -> String {
        table::render_record(
            &[
                ("id", self.id.to_string()),
                ("name", self.name.clone()),
                ("parent", parent_cell(self.parent_id)),
                ("codings", self.coding_count.to_string()),
                ("updated", self.updated_at.format("%Y-%m-%d %H:%M").to_string()),
            ],
            options,
        )
    }
}

impl Tabular for Source {
    fn to_table(&self, options: TableOptions) -> String {
        table::render_record(
            &[
                ("number", self.source_number.to_string()),
                ("name", self.source_name.clone()),
                ("author", or_dash(self.author.as_deref())),
                ("publication", or_dash(self.publication_title.as_deref())),
                ("type", or_dash(self.source_type.as_deref())),
                ("search", or_dash(self.search_type.as_deref())),
                ("url", or_dash(self.url.as_deref())),
                ("reviewed", yes_no(self.initial_coding_done).to_string()),
            ],
            options,
        )
    }
}

impl Tabular for Coding {
    fn to_table(&self, options: TableOptions) -> String {
        table::render_record(
            &[
                ("id", self.id.to_string()),
                ("code", self.code_id.to_string()),
                ("source", self.source_id.to_string()),
                ("span", span_cell(self)),
                ("snippet", one_line(&self.snippet)),
            ],
            options,
        )
    }
}

impl Tabular for SourceDetail {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = self.source.to_table(options);
        out.push_str(&section("codings", &rows(&self.codings, options)));
        out
    }
}

impl Tabular for CodeCodingsResponse {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = self.code.to_table(options);
        out.push_str(&section("codings", &rows(&self.codings, options)));
        out
    }
}

impl Tabular for ReviewSummary {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = format!("reviewed sources: {}", self.total_reviewed);
        if !self.by_source_type.is_empty() {
            let counts = self
                .by_source_type
                .iter()
                .map(|(kind, count)| vec![kind.clone(), count.to_string()])
                .collect::<Vec<_>>();
            let body = table::render_columns(&["type", "reviewed"], &counts, options);
            out.push_str(&section("by type", &body));
        }
        out
    }
}

impl Tabular for ParentUpdateReport {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = format!("moved {} code(s)", self.updated.len());
        if !self.updated.is_empty() {
            out.push('\n');
            out.push_str(&rows(&self.updated, options));
        }
        if !self.failed.is_empty() {
            out.push_str(&section("failed", &rows(&self.failed, options)));
        }
        out
    }
}

fn outline_with_orphans(forest: &[TreeNode], orphans: &[CodeId]) -> String {
    let mut out = table::render_outline(forest);
    if let Some(note) = table::orphans_note(orphans) {
        out.push_str("\n\n");
        out.push_str(&note);
    }
    out
}

fn widget_forest(nodes: &[WidgetNode]) -> Vec<TreeNode> {
    nodes.iter().cloned().map(TreeNode::from).collect()
}

impl Tabular for CodeTreeResponse {
    fn to_table(&self, _options: TableOptions) -> String {
        outline_with_orphans(&self.tree, &self.orphans)
    }
}

impl Tabular for WidgetTreeResponse {
    fn to_table(&self, _options: TableOptions) -> String {
        outline_with_orphans(&widget_forest(&self.tree), &self.orphans)
    }
}

impl Tabular for WidgetSaveResponse {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = self.report.to_table(options);
        out.push_str(&section(
            "tree",
            &outline_with_orphans(&widget_forest(&self.tree), &self.orphans),
        ));
        out
    }
}
