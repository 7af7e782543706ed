use crate::{
    discover::find_pdf_files,
    engine::Engine,
    pipeline::Converter,
    report::{BatchReport, ConversionResult, Failure},
    util::ensure_dir,
};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use tracing::{info, warn};

/// Converts every PDF under the converter's data root.
///
/// Discovery errors are returned; a failing document is recorded in the
/// report and the batch moves on.
pub fn run_batch<E: Engine>(converter: &Converter<E>) -> Result<BatchReport> {
    let cfg = converter.config();
    // Discover first: the default output root lives inside the data root and
    // creating it would mask a missing data directory.
    let inputs = find_pdf_files(converter.data_dir())?;
    ensure_dir(converter.out_dir())?;
    let total = inputs.len();
    info!(
        "batch start files={} data={} out={}",
        total,
        converter.data_dir().display(),
        converter.out_dir().display()
    );

    let mut report = BatchReport {
        total,
        ..Default::default()
    };

    for input in inputs {
        match converter.convert(&input) {
            Ok(output) => {
                report.succeeded += 1;
                println!("进度: {}/{}", report.succeeded, total);
                report.results.push(ConversionResult::Converted {
                    source: input,
                    output,
                });
            }
            Err(err) => {
                let message = err.to_string();
                warn!(kind = ?err.kind(), "{message}");
                println!("转换 {} 时出错：{}", input.display(), message);
                report.failures.push(Failure {
                    source: input.clone(),
                    kind: err.kind(),
                    message: message.clone(),
                });
                report.results.push(ConversionResult::Failed {
                    source: input,
                    kind: err.kind(),
                    message,
                });
            }
        }
    }
    report.failed = report.failures.len();

    if cfg.output.print_summary {
        print!("{}", render_summary(&report));
    }

    if cfg.output.write_report_json {
        let path = converter.out_dir().join(&cfg.output.report_filename);
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing report: {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    info!(
        "batch done total={} ok={} failed={}",
        report.total, report.succeeded, report.failed
    );
    Ok(report)
}

/// The end-of-run console summary.
pub fn render_summary(report: &BatchReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "\n转换完成！");
    let _ = writeln!(s, "总文件数: {}", report.total);
    let _ = writeln!(s, "成功转换: {}", report.succeeded);
    let _ = writeln!(s, "失败文件数: {}", report.failed);

    if !report.failures.is_empty() {
        let _ = writeln!(s, "\n失败文件列表:");
        for f in &report.failures {
            let _ = writeln!(s, "- {}: {}", f.source.display(), f.message);
        }
    }
    s
}
