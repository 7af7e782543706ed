use serde::{Deserialize, Serialize};
use tracing::debug;

/// A grid of cell values; the first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.first().is_none_or(|h| h.is_empty())
    }
}

/// Renders `table` as a Markdown pipe table followed by a blank line.
///
/// Every row is shaped to the header's column count: short rows are padded
/// with empty cells and long rows are truncated. An empty table renders as "".
pub fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }

    let cols = table.rows[0].len();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != cols {
                debug!(
                    "table row {} has {} cells, header has {}; reshaping",
                    i,
                    row.len(),
                    cols
                );
            }
            let mut cells: Vec<String> = row.iter().take(cols).map(clean_cell).collect();
            cells.resize(cols, String::new());
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..cols)
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&rows[0], &widths));
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(render_row(&dashes, &widths));
    for row in &rows[1..] {
        lines.push(render_row(row, &widths));
    }

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

fn clean_cell(cell: &Option<String>) -> String {
    cell.as_deref()
        .unwrap_or("")
        .trim()
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let body: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!(" {cell:<w$} ", w = *w))
        .collect();
    format!("|{}|", body.join("|"))
}
