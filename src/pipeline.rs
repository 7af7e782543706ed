use crate::{
    config::{Config, Mode},
    engine::{Engine, Page, PdfDocument},
    error::ConvertError,
    markdown::{self, DocumentHeader, RenderOptions},
    postprocess,
    util::now_stamp,
};
use std::path::{Path, PathBuf};
use time::UtcOffset;
use tracing::{debug, info, warn};

/// Converts one PDF into one Markdown file under the output root, mirroring
/// the source's directory relative to the data root.
pub struct Converter<E: Engine> {
    cfg: Config,
    engine: E,
    data_dir: PathBuf,
    out_dir: PathBuf,
    offset: UtcOffset,
}

impl<E: Engine> Converter<E> {
    pub fn new(cfg: &Config, engine: E, offset: UtcOffset) -> Self {
        Self {
            cfg: cfg.clone(),
            engine,
            data_dir: PathBuf::from(&cfg.paths.data_dir),
            out_dir: cfg.out_dir(),
            offset,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Where the Markdown for `input` is written.
    pub fn target_path(&self, input: &Path) -> PathBuf {
        let stem = title_of(input);
        let sub = match input.strip_prefix(&self.data_dir) {
            Ok(rel) => rel.parent().map(Path::to_path_buf).unwrap_or_default(),
            Err(_) => {
                warn!(
                    "{} is outside {}; writing to the output root",
                    input.display(),
                    self.data_dir.display()
                );
                PathBuf::new()
            }
        };
        self.out_dir.join(sub).join(format!("{stem}.md"))
    }

    pub fn convert(&self, input: &Path) -> Result<PathBuf, ConvertError> {
        let target = self.target_path(input);
        if let Some(dir) = target.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConvertError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        info!("converting {}", input.display());
        let pages = self.extract_pages(input)?;

        let header = DocumentHeader {
            title: title_of(input),
            source: input.display().to_string(),
            converted_at: now_stamp(self.offset),
        };
        let opts = RenderOptions {
            table_layout: self.cfg.conversion.table_layout,
        };
        let md = markdown::render_document(&header, &pages, &opts);

        markdown::write_output(&target, &md, self.cfg.output.atomic_write).map_err(|source| {
            ConvertError::Write {
                path: target.clone(),
                source,
            }
        })?;

        info!("wrote {} pages={}", target.display(), pages.len());
        Ok(target)
    }

    fn extract_pages(&self, input: &Path) -> Result<Vec<Page>, ConvertError> {
        let doc = self.engine.open(input).map_err(|e| ConvertError::Open {
            path: input.to_path_buf(),
            detail: format!("{e:#}"),
        })?;

        let extract_err = |page: u32, e: anyhow::Error| ConvertError::Extract {
            path: input.to_path_buf(),
            page,
            detail: format!("{e:#}"),
        };

        let count = doc.page_count();
        let mut pages = Vec::with_capacity(count as usize);
        for number in 1..=count {
            let raw = doc.page_text(number).map_err(|e| extract_err(number, e))?;
            let text = postprocess::clean_page_text(&self.cfg.postprocess, &raw);
            let tables = match self.cfg.conversion.mode {
                Mode::Plain => Vec::new(),
                Mode::Tables => doc
                    .page_tables(number, &text)
                    .map_err(|e| extract_err(number, e))?,
            };
            debug!("page {} chars={} tables={}", number, text.len(), tables.len());
            pages.push(Page {
                number,
                text,
                tables,
            });
        }
        Ok(pages)
    }
}

fn title_of(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
