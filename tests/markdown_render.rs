use pdf2md_batch::{
    config::TableLayout,
    engine::Page,
    markdown::{DocumentHeader, RenderOptions, render_document, write_output},
    table::Table,
};

fn header() -> DocumentHeader {
    DocumentHeader {
        title: "q1".into(),
        source: "data/reports/q1.pdf".into(),
        converted_at: "2024-03-01 09:30:00".into(),
    }
}

fn page(number: u32, text: &str, tables: Vec<Table>) -> Page {
    Page {
        number,
        text: text.into(),
        tables,
    }
}

const HEAD: &str = "# q1\n\n原始文件：data/reports/q1.pdf\n转换时间：2024-03-01 09:30:00\n\n## 目录\n\n";

#[test]
fn zero_pages_still_has_header() {
    let md = render_document(&header(), &[], &RenderOptions::default());
    assert_eq!(md, HEAD);
}

#[test]
fn plain_pages_collapse_whitespace() {
    let pages = vec![page(1, "Hello   world\n\n  again ", vec![]), page(2, "", vec![])];
    let md = render_document(&header(), &pages, &RenderOptions::default());
    assert_eq!(
        md,
        format!("{HEAD}## 第 1 页\n\nHello world again\n\n## 第 2 页\n\n\n\n")
    );
}

#[test]
fn tables_interleave_after_segments() {
    let t1 = Table::from_strings(vec![vec!["a", "b"], vec!["1", "2"]]);
    let t2 = Table::from_strings(vec![vec!["c"], vec!["3"]]);
    let pages = vec![page(1, "First  line\n\n  Second\n", vec![t1, t2])];
    let md = render_document(&header(), &pages, &RenderOptions::default());
    let body = md.strip_prefix(HEAD).unwrap();
    assert_eq!(
        body,
        "## 第 1 页\n\nFirst  line\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\nSecond\n\n| c |\n| - |\n| 3 |\n\n"
    );
}

#[test]
fn leftover_tables_follow_the_text() {
    let t1 = Table::from_strings(vec![vec!["a"], vec!["1"]]);
    let t2 = Table::from_strings(vec![vec!["b"], vec!["2"]]);
    let pages = vec![page(1, "only line", vec![t1, t2])];
    let md = render_document(&header(), &pages, &RenderOptions::default());
    let body = md.strip_prefix(HEAD).unwrap();
    assert_eq!(
        body,
        "## 第 1 页\n\nonly line\n\n| a |\n| - |\n| 1 |\n\n| b |\n| - |\n| 2 |\n\n"
    );
}

#[test]
fn after_text_layout_puts_tables_last() {
    let t1 = Table::from_strings(vec![vec!["a"], vec!["1"]]);
    let pages = vec![page(1, "one\ntwo", vec![t1])];
    let opts = RenderOptions {
        table_layout: TableLayout::AfterText,
    };
    let md = render_document(&header(), &pages, &opts);
    let body = md.strip_prefix(HEAD).unwrap();
    assert_eq!(body, "## 第 1 页\n\none\n\ntwo\n\n| a |\n| - |\n| 1 |\n\n");
}

#[test]
fn write_output_replaces_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("doc.md");
    std::fs::write(&target, "old content that is much longer than the new one").unwrap();

    write_output(&target, "new", true).unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");

    write_output(&target, "plain", false).unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "plain");

    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn atomic_write_uses_regular_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let atomic = tmp.path().join("atomic.md");
    let plain = tmp.path().join("plain.md");
    write_output(&atomic, "hi", true).unwrap();
    write_output(&plain, "hi", false).unwrap();

    let mode = |p: &std::path::Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&atomic), mode(&plain));
}

#[cfg(unix)]
#[test]
fn atomic_write_keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("doc.md");
    std::fs::write(&target, "old").unwrap();
    std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();

    write_output(&target, "new", true).unwrap();
    let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}
