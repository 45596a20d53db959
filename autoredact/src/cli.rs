// autoredact/src/cli.rs
//! Command-line interface definition for the `autoredact` binary: global
//! flags, the `redact` and `scan` subcommands and the rule overrides they
//! share.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::input::InputFormat;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "autoredact",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find sensitive text in OCR output and black it out",
    long_about = "autoredact reads the words an OCR engine found on a page (text plus pixel box), detects emails, IP addresses, card numbers, secrets, PII and user-defined terms, and produces the rectangles to black out. With --image it paints those rectangles onto the screenshot.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Computes redaction regions for one page and optionally paints them.
    #[command(about = "Compute redaction regions for one page of OCR words and optionally paint them onto the image.")]
    Redact(RedactCommand),

    /// Counts detections across several pages without producing regions.
    #[command(about = "Scan one or more pages of OCR words and report what would be redacted.")]
    Scan(ScanCommand),
}

/// Rule overrides applied on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    #[arg(long = "no-emails", help = "Do not detect email addresses.")]
    pub no_emails: bool,

    #[arg(long = "no-ips", help = "Do not detect IPv4/IPv6 addresses.")]
    pub no_ips: bool,

    #[arg(long = "no-credit-cards", help = "Do not detect credit card numbers.")]
    pub no_credit_cards: bool,

    #[arg(long = "no-secrets", help = "Do not detect API keys, tokens and other secrets.")]
    pub no_secrets: bool,

    #[arg(long = "no-pii", help = "Do not detect phone numbers, SSNs and national insurance numbers.")]
    pub no_pii: bool,

    /// Replaces the configured allowlist.
    #[arg(long, value_name = "VALUES", value_delimiter = ',', help = "Values never to redact (comma-separated). Replaces the default allowlist.")]
    pub allowlist: Option<Vec<String>>,

    #[arg(long = "block-words", value_name = "WORDS", value_delimiter = ',', help = "Extra words to always redact (comma-separated).")]
    pub block_words: Vec<String>,

    #[arg(long = "custom-dates", value_name = "DATES", value_delimiter = ',', help = "Dates or date formats to redact, e.g. 2024-03-01 or DD/MM/YYYY (comma-separated).")]
    pub custom_dates: Vec<String>,

    #[arg(long = "custom-regex", value_name = "PATTERN", help = "Additional case-insensitive regex to redact. May be repeated.")]
    pub custom_regex: Vec<String>,
}

/// Arguments for the `redact` command.
#[derive(Args, Debug)]
pub struct RedactCommand {
    #[arg(value_name = "WORDS", help = "OCR word file (JSON or Tesseract TSV).")]
    pub words: PathBuf,

    #[arg(long, value_enum, help = "Format of the word file. Guessed from the extension when omitted.")]
    pub format: Option<InputFormat>,

    #[arg(long, value_name = "IMAGE", help = "Screenshot to paint the regions onto.")]
    pub image: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", requires = "image", help = "Where to write the redacted image (defaults to redacted-<name>.png next to the input).")]
    pub output: Option<PathBuf>,

    #[arg(long = "config", value_name = "FILE", env = "AUTOREDACT_CONFIG", help = "Path to a rule configuration file (YAML or JSON).")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[arg(long = "regions-out", value_name = "FILE", help = "Write the full result (regions, breakdown, detections) as JSON to this file.")]
    pub regions_out: Option<PathBuf>,

    #[arg(long, help = "Print the full result as JSON to stdout.")]
    pub json: bool,

    #[arg(long = "no-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanCommand {
    #[arg(value_name = "WORDS", required = true, num_args = 1.., help = "One OCR word file per page.")]
    pub words: Vec<PathBuf>,

    #[arg(long, value_enum, help = "Format of the word files. Guessed per file from the extension when omitted.")]
    pub format: Option<InputFormat>,

    #[arg(long = "config", value_name = "FILE", env = "AUTOREDACT_CONFIG", help = "Path to a rule configuration file (YAML or JSON).")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the total number of detections exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,

    #[arg(long, help = "Print the per-page and total breakdown as JSON to stdout.")]
    pub json: bool,
}
