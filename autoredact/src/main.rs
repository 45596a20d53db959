// autoredact/src/main.rs
//! `autoredact` entry point.

use anyhow::{Context, Result};
use clap::Parser;

use autoredact::cli::{Cli, Commands};
use autoredact::commands::{redact, scan};
use autoredact::logger;
use autoredact::ui::theme::build_theme_map;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));
    log::debug!("Parsed arguments: {:?}", cli);

    let theme_map = build_theme_map(cli.theme.as_ref()).context("Failed to load theme")?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Redact(cmd) => {
            let theme = theme_map.clone();
            tokio::task::spawn_blocking(move || redact::run_redact(&cmd, quiet, &theme))
                .await
                .context("Redact task failed to complete")??;
        }
        Commands::Scan(cmd) => {
            scan::run_scan(cmd, quiet, &theme_map).await?;
        }
    }

    Ok(())
}
