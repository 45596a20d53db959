//! `autoredact redact`: regions for a single page.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use autoredact_core::{RedactionEngine, RedactionResult};

use crate::cli::RedactCommand;
use crate::commands::{info_msg, report_rule_warnings, success_msg};
use crate::input::read_words;
use crate::paint;
use crate::settings::resolve_config;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;

pub fn run_redact(cmd: &RedactCommand, quiet: bool, theme_map: &ThemeMap) -> Result<RedactionResult> {
    info!("Starting redact for {}.", cmd.words.display());

    let config = resolve_config(cmd.config.as_deref(), &cmd.rules)?;
    let words = read_words(&cmd.words, cmd.format)?;
    let engine = RedactionEngine::new(&config);
    if !quiet {
        report_rule_warnings(engine.warnings(), theme_map);
    }

    let result = engine.redact(&words);
    debug!(
        "{} words produced {} detections and {} regions.",
        words.len(),
        result.detections.len(),
        result.regions.len()
    );

    if let Some(path) = &cmd.regions_out {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize redaction result")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        if !quiet {
            info_msg(format!("Regions written to {}", path.display()), theme_map);
        }
    }

    if cmd.json {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &result).context("Failed to serialize redaction result")?;
        writeln!(writer)?;
    }

    if let Some(image) = &cmd.image {
        let output = cmd.output.clone().unwrap_or_else(|| paint::default_output_path(image));
        let painted = paint::redact_image_file(image, &output, &result.regions)?;
        if !quiet {
            success_msg(format!("Redacted {} region(s) into {}", painted, output.display()), theme_map);
        }
    }

    if !cmd.no_summary && !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        summary::print_breakdown(
            &mut io::stderr(),
            &result.breakdown,
            result.regions.len(),
            theme_map,
            stderr_supports_color,
        )?;
    }

    info!("Redact completed.");
    Ok(result)
}
