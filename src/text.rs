use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every whitespace run (newlines included) to one space and trims.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Splits on newlines, trims each line and drops the empty ones. Inner
/// spacing of a line is kept as extracted.
pub fn segments(s: &str) -> Vec<&str> {
    s.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
