use super::{Engine, PdfDocument, tables};
use crate::{config::Tables, table::Table};
use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::debug;

pub struct LopdfEngine {
    tables: Tables,
}

impl LopdfEngine {
    pub fn new(tables: &Tables) -> Self {
        Self {
            tables: tables.clone(),
        }
    }
}

pub struct LopdfDocument {
    doc: lopdf::Document,
    pages: Vec<u32>,
    tables: Tables,
}

impl Engine for LopdfEngine {
    type Document = LopdfDocument;

    fn open(&self, input: &Path) -> Result<LopdfDocument> {
        let doc = lopdf::Document::load(input)
            .map_err(|e| anyhow!("lopdf load: {e}"))?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!("opened {} pages={}", input.display(), pages.len());
        Ok(LopdfDocument {
            doc,
            pages,
            tables: self.tables.clone(),
        })
    }
}

impl LopdfDocument {
    fn page_id(&self, page: u32) -> Result<u32> {
        let idx = page
            .checked_sub(1)
            .ok_or_else(|| anyhow!("page numbers start at 1"))?;
        self.pages
            .get(idx as usize)
            .copied()
            .ok_or_else(|| anyhow!("page {page} out of range ({} pages)", self.pages.len()))
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let n = self.page_id(page)?;
        let text = self
            .doc
            .extract_text(&[n])
            .map_err(|e| anyhow!("extract_text: {e}"))?;
        Ok(text)
    }

    fn page_tables(&self, page: u32, text: &str) -> Result<Vec<Table>> {
        self.page_id(page)?;
        Ok(tables::detect_tables(text, &self.tables))
    }
}
