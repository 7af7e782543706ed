use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdf2md_batch::{
    config::{Config, Tables},
    engine::{Engine, LopdfEngine, PdfDocument},
    error::ConvertError,
    pipeline::Converter,
    text::collapse_whitespace,
};
use std::path::Path;
use time::UtcOffset;

fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn extracts_text_per_page() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf = tmp.path().join("hello.pdf");
    write_pdf(&pdf, &["Hello World", ""]);

    let engine = LopdfEngine::new(&Tables::default());
    let doc = engine.open(&pdf).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert!(collapse_whitespace(&doc.page_text(1).unwrap()).contains("Hello World"));
    assert_eq!(collapse_whitespace(&doc.page_text(2).unwrap()), "");
    assert!(doc.page_text(3).is_err());
}

#[test]
fn converts_generated_pdf() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    std::fs::create_dir_all(data.join("reports")).unwrap();
    write_pdf(&data.join("reports/q1.pdf"), &["Hello World"]);

    let mut cfg = Config::default();
    cfg.paths.data_dir = data.display().to_string();
    let conv = Converter::new(&cfg, LopdfEngine::new(&cfg.tables), UtcOffset::UTC);
    let out = conv.convert(&data.join("reports/q1.pdf")).unwrap();

    assert_eq!(out, data.join("markdown/reports/q1.md"));
    let md = std::fs::read_to_string(out).unwrap();
    assert!(md.starts_with("# q1\n\n"));
    assert!(md.contains("## 第 1 页\n\n"));
    assert!(md.contains("Hello World"));
}

#[test]
fn garbage_is_an_open_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let bogus = data.join("bogus.pdf");
    std::fs::write(&bogus, b"this is not a pdf").unwrap();

    let mut cfg = Config::default();
    cfg.paths.data_dir = data.display().to_string();
    let conv = Converter::new(&cfg, LopdfEngine::new(&cfg.tables), UtcOffset::UTC);
    let err = conv.convert(&bogus).unwrap_err();
    assert!(matches!(err, ConvertError::Open { .. }));
    assert!(!data.join("markdown/bogus.md").exists());
}

#[test]
fn tables_come_from_the_given_text() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf = tmp.path().join("t.pdf");
    write_pdf(&pdf, &["Hello World"]);

    let engine = LopdfEngine::new(&Tables::default());
    let doc = engine.open(&pdf).unwrap();
    let tables = doc.page_tables(1, "k    v\nx    1").unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].rows.len(), 2);
    assert!(doc.page_tables(1, "Hello World").unwrap().is_empty());
    assert!(doc.page_tables(2, "k    v\nx    1").is_err());
}
