use qc_core::ids::CodeId;
use qc_core::tree::TreeNode;

const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
}

impl TableOptions {
    /// Fit tables to `COLUMNS` when it is set and usable.
    #[must_use]
    pub fn detect() -> Self {
        Self::for_columns(std::env::var("COLUMNS").ok().as_deref())
    }

    fn for_columns(columns: Option<&str>) -> Self {
        Self {
            max_width: columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

/// Render rows under a header line. Numeric cells are right-aligned.
#[must_use]
pub fn render_columns(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(4)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                format_cell(&truncated, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = vec![header_line, divider];
    lines.extend(row_lines);
    lines.join("\n")
}

/// Render one record as `field  value` lines, values left-aligned in a column.
#[must_use]
pub fn render_record(fields: &[(&str, String)], options: TableOptions) -> String {
    let label_width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = options
        .max_width
        .map(|max| max.saturating_sub(label_width + 2).max(4));

    fields
        .iter()
        .map(|(label, value)| {
            let value = value_width.map_or_else(|| value.clone(), |w| truncate_text(value, w));
            format!("{}  {value}", format_cell(label, label_width, false))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Note listing codes whose parent does not exist, if any.
#[must_use]
pub fn orphans_note(orphans: &[CodeId]) -> Option<String> {
    if orphans.is_empty() {
        return None;
    }
    let ids = orphans
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("codes with a missing parent: {ids}"))
}

/// Render a code forest as an indented outline, one node per line.
#[must_use]
pub fn render_outline(forest: &[TreeNode]) -> String {
    fn walk(nodes: &[TreeNode], depth: usize, lines: &mut Vec<String>) {
        for node in nodes {
            lines.push(format!("{}{}  [{}]", "  ".repeat(depth), node.label, node.id));
            walk(node.children(), depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    walk(forest, 0, &mut lines);
    if lines.is_empty() {
        return String::from("(no codes)");
    }
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    // Shave the widest shrinkable column one char at a time.
    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || ch == '-')
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}
