pub mod lopdf_engine;
pub mod tables;

use crate::table::Table;
use anyhow::Result;
use std::path::Path;

pub use lopdf_engine::LopdfEngine;

/// Opens PDF documents. Parsing itself is delegated to the implementation.
pub trait Engine {
    type Document: PdfDocument;

    fn open(&self, input: &Path) -> Result<Self::Document>;
}

/// An opened document. Page numbers are 1-based.
pub trait PdfDocument {
    fn page_count(&self) -> u32;
    /// Extracted text of a page; "" when the page has no text layer.
    fn page_text(&self, page: u32) -> Result<String>;
    /// Tables on a page. `text` is the page text after cleaning, as rendered.
    fn page_tables(&self, page: u32, text: &str) -> Result<Vec<Table>>;
}

/// One extracted page, owned by the conversion that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub text: String,
    pub tables: Vec<Table>,
}
