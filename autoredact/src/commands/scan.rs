//! `autoredact scan`: detection counts across many pages.
//!
//! Pages are processed concurrently on the blocking pool. They all share one
//! compiled engine, which is immutable and therefore safe to use from every
//! task at once.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use autoredact_core::{DetectionBreakdown, RedactionEngine};

use crate::cli::ScanCommand;
use crate::commands::{error_msg, report_rule_warnings};
use crate::input::{read_words, InputFormat};
use crate::settings::resolve_config;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub page: String,
    pub words: usize,
    pub regions: usize,
    pub breakdown: DetectionBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub pages: Vec<PageReport>,
    pub total: DetectionBreakdown,
}

fn scan_page(engine: &RedactionEngine, path: PathBuf, format: Option<InputFormat>) -> Result<PageReport> {
    let words = read_words(&path, format)?;
    let result = engine.redact(&words);
    debug!("{}: {} detections.", path.display(), result.breakdown.total());
    Ok(PageReport {
        page: path.display().to_string(),
        words: words.len(),
        regions: result.regions.len(),
        breakdown: result.breakdown,
    })
}

/// Scans every page and combines their breakdowns, keeping input order.
pub async fn scan_pages(engine: Arc<RedactionEngine>, pages: Vec<PathBuf>, format: Option<InputFormat>) -> Result<ScanReport> {
    let handles: Vec<_> = pages
        .into_iter()
        .map(|path| {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || scan_page(&engine, path, format))
        })
        .collect();

    let mut report = ScanReport {
        pages: Vec::with_capacity(handles.len()),
        total: DetectionBreakdown::default(),
    };
    for handle in handles {
        let page = handle.await.context("Scan task failed to complete")??;
        report.total.accumulate(&page.breakdown);
        report.pages.push(page);
    }
    Ok(report)
}

pub async fn run_scan(cmd: ScanCommand, quiet: bool, theme_map: &ThemeMap) -> Result<ScanReport> {
    info!("Starting scan of {} page(s).", cmd.words.len());

    let config = resolve_config(cmd.config.as_deref(), &cmd.rules)?;
    let engine = Arc::new(RedactionEngine::new(&config));
    if !quiet {
        report_rule_warnings(engine.warnings(), theme_map);
    }

    let report = scan_pages(engine, cmd.words, cmd.format).await?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to serialize scan report")?;
        writeln!(writer)?;
    } else {
        let rows: Vec<(String, DetectionBreakdown)> =
            report.pages.iter().map(|p| (p.page.clone(), p.breakdown)).collect();
        let supports_color = stdout.is_terminal();
        summary::print_scan_report(&mut writer, &rows, &report.total, theme_map, supports_color)?;
    }
    drop(writer);

    if let Some(threshold) = cmd.fail_over_threshold {
        let total = report.total.total();
        if total > threshold {
            error_msg(
                format!("{} detections exceed the threshold of {}.", total, threshold),
                theme_map,
            );
            bail!("Scan failed: {} detections exceed threshold {}", total, threshold);
        }
    }

    info!("Scan completed.");
    Ok(report)
}
