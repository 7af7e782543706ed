use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub conversion: Conversion,
    #[serde(default)]
    pub tables: Tables,
    #[serde(default)]
    pub postprocess: Postprocess,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Output root; an empty `paths.out_dir` means `<data_dir>/markdown`.
    pub fn out_dir(&self) -> PathBuf {
        if self.paths.out_dir.is_empty() {
            Path::new(&self.paths.data_dir).join("markdown")
        } else {
            PathBuf::from(&self.paths.out_dir)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub data_dir: String,
    pub out_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            out_dir: "".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Plain,
    Tables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableLayout {
    /// One table after each non-empty text segment; leftovers follow the text.
    #[default]
    Interleave,
    AfterText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversion {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub table_layout: TableLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tables {
    pub min_rows: usize,
    pub min_columns: usize,
    pub max_columns: usize,
}
impl Default for Tables {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Postprocess {
    pub normalize_unicode: bool,
    pub strip_control_chars: bool,
}
impl Default for Postprocess {
    fn default() -> Self {
        Self {
            normalize_unicode: false,
            strip_control_chars: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub atomic_write: bool,
    pub write_report_json: bool,
    pub report_filename: String,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            atomic_write: true,
            write_report_json: false,
            report_filename: "conversion-report.json".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
