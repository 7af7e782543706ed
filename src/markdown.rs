use crate::{
    config::TableLayout,
    engine::Page,
    table::format_table,
    text,
};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DocumentHeader {
    /// Base name of the source PDF, without extension.
    pub title: String,
    /// Source path as it was discovered.
    pub source: String,
    /// Local conversion time, `YYYY-MM-DD HH:MM:SS`.
    pub converted_at: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub table_layout: TableLayout,
}

pub fn render_document(header: &DocumentHeader, pages: &[Page], opts: &RenderOptions) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", header.title));
    md.push_str(&format!("原始文件：{}\n", header.source));
    md.push_str(&format!("转换时间：{}\n\n", header.converted_at));
    md.push_str("## 目录\n\n");

    for page in pages {
        md.push_str(&format!("## 第 {} 页\n\n", page.number));
        render_page_body(&mut md, page, opts);
    }
    md
}

fn render_page_body(md: &mut String, page: &Page, opts: &RenderOptions) {
    if page.tables.is_empty() {
        md.push_str(&text::collapse_whitespace(&page.text));
        md.push_str("\n\n");
        return;
    }

    let segments = text::segments(&page.text);
    let mut tables = page.tables.iter();

    match opts.table_layout {
        TableLayout::Interleave => {
            for seg in segments {
                push_segment(md, seg);
                if let Some(t) = tables.next() {
                    md.push_str(&format_table(t));
                }
            }
        }
        TableLayout::AfterText => {
            for seg in segments {
                push_segment(md, seg);
            }
        }
    }

    // Tables without a preceding segment still belong to the page.
    for t in tables {
        md.push_str(&format_table(t));
    }
}

fn push_segment(md: &mut String, seg: &str) {
    md.push_str(seg);
    md.push_str("\n\n");
}

/// Writes `contents` to `target`, replacing any previous file.
///
/// With `atomic`, the bytes go to a temp file in the target's directory which
/// is then renamed over `target`, so a failed write never leaves a truncated
/// Markdown file behind.
pub fn write_output(target: &Path, contents: &str, atomic: bool) -> std::io::Result<()> {
    if !atomic {
        return std::fs::write(target, contents);
    }

    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdf2md-").suffix(".md.tmp");
    // Temp files are created 0600; give the output the mode a plain write
    // would, or keep the mode of the file being replaced.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = match std::fs::metadata(target) {
            Ok(meta) => meta.permissions(),
            Err(_) => std::fs::Permissions::from_mode(0o666),
        };
        builder.permissions(perms);
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
