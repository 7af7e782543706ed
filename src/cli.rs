use crate::{
    batch::run_batch,
    config::{Config, Mode},
    discover::find_pdf_files,
    engine::LopdfEngine,
    pipeline::Converter,
    util::ensure_dir,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use time::UtcOffset;
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pdf2md-batch")]
#[command(about = "Convert every PDF under a directory into Markdown, one file per PDF")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Path to config TOML. If omitted, uses ./pdf2md.toml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert all PDFs (the default when no subcommand is given).
    Run {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Detect tables and render them as Markdown tables.
        #[arg(long)]
        tables: bool,
    },
    /// Print the PDFs that would be converted, as JSON.
    List {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args, offset: UtcOffset) -> Result<()> {
    let mut cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    match &args.cmd {
        None => run(&args, &cfg, offset),
        Some(Command::Run {
            data_dir,
            out_dir,
            tables,
        }) => {
            if let Some(d) = data_dir {
                cfg.paths.data_dir = d.display().to_string();
            }
            if let Some(o) = out_dir {
                cfg.paths.out_dir = o.display().to_string();
            }
            if *tables {
                cfg.conversion.mode = Mode::Tables;
            }
            run(&args, &cfg, offset)
        }
        Some(Command::List { data_dir }) => {
            if let Some(d) = data_dir {
                cfg.paths.data_dir = d.display().to_string();
            }
            let _guard = init_logging(&args, &cfg, None)?;
            list(&cfg)
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("pdf2md.toml");
    default.exists().then_some(default)
}

pub const LOG_FILE_NAME: &str = "pdf2md-batch.log";

/// Events go to stderr so stdout carries only progress lines and the summary.
/// With a file path, events are also appended to that file across runs.
fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let console_layer = if cfg.logging.json {
        console.json().boxed()
    } else {
        console.compact().boxed()
    };

    let mut guard = None;
    let file_layer = match file_path {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            ensure_dir(dir)?;
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name.to_string_lossy())
                .build(dir)
                .with_context(|| format!("open log file: {}", path.display()))?;
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn run(args: &Args, cfg: &Config, offset: UtcOffset) -> Result<()> {
    let log_path = resolve_log_path(cfg);
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!(
        "mode={:?} data={} out={}",
        cfg.conversion.mode,
        cfg.paths.data_dir,
        cfg.out_dir().display()
    );

    let engine = LopdfEngine::new(&cfg.tables);
    let converter = Converter::new(cfg, engine, offset);
    run_batch(&converter)?;
    Ok(())
}

fn list(cfg: &Config) -> Result<()> {
    let files = find_pdf_files(Path::new(&cfg.paths.data_dir))?;
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

/// Log file for a run, if file logging is enabled.
pub fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(cfg.out_dir().join(LOG_FILE_NAME))
}
