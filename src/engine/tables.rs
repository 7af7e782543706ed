//! Table detection on a page's text layer.
//!
//! A line whose content splits into several cells on tabs or runs of two or
//! more spaces is a candidate row. Consecutive candidate rows with the same
//! cell count form a table. This is a best-effort heuristic: text layers that
//! lose column spacing yield no tables.

use crate::{config::Tables, table::Table};
use regex::Regex;
use std::sync::LazyLock;

static CELL_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+| {2,}").unwrap());

pub fn detect_tables(text: &str, cfg: &Tables) -> Vec<Table> {
    let min_rows = cfg.min_rows.max(1);
    let min_cols = cfg.min_columns.max(2);
    let max_cols = cfg.max_columns.max(min_cols);

    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    let mut flush = |run: &mut Vec<Vec<String>>| {
        if run.len() >= min_rows {
            let rows = std::mem::take(run);
            tables.push(Table::from_strings(rows));
        } else {
            run.clear();
        }
    };

    for line in text.lines() {
        let cells = split_cells(line);
        let is_row = (min_cols..=max_cols).contains(&cells.len());
        let same_shape = run.first().is_none_or(|h| h.len() == cells.len());

        if is_row && same_shape {
            run.push(cells);
        } else {
            flush(&mut run);
            if is_row {
                run.push(cells);
            }
        }
    }
    flush(&mut run);

    tables
}

fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    CELL_GAP
        .split(line)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
