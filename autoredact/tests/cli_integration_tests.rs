// autoredact/tests/cli_integration_tests.rs
//! Integration tests for `autoredact redact`.
//!
//! Each test writes an OCR word file into a temporary directory and runs the
//! built binary against it. `XDG_CONFIG_HOME` points into the same directory
//! so a settings file in the developer's real config dir cannot leak in.

use anyhow::Result;
use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PAGE_JSON: &str = r#"[
  {"text": "Contact:", "bbox": {"x0": 10, "y0": 10, "x1": 80, "y1": 30}},
  {"text": "jane@example.com", "bbox": {"x0": 90, "y0": 10, "x1": 250, "y1": 30}},
  {"text": "server", "bbox": {"x0": 10, "y0": 40, "x1": 70, "y1": 60}},
  {"text": "10.20.30.40", "bbox": {"x0": 80, "y0": 40, "x1": 190, "y1": 60}}
]"#;

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

fn autoredact(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("autoredact").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path());
    cmd.env_remove("AUTOREDACT_CONFIG");
    cmd.env("RUST_LOG", "debug");
    cmd.env("AUTOREDACT_ALLOW_DEBUG_PII", "true");
    cmd
}

fn json_stdout(output: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(output)?)
}

#[test]
fn redact_prints_summary_to_stderr() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    autoredact(&dir)
        .arg("redact")
        .arg(&words)
        .assert()
        .success()
        .stderr(predicate::str::contains("Redaction Summary"))
        .stderr(predicate::str::contains("Emails Found"))
        .stderr(predicate::str::contains("PII/Other Found"))
        .stderr(predicate::str::contains("2 region(s) to redact."));
    Ok(())
}

#[test]
fn json_output_contains_padded_regions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    let output = autoredact(&dir)
        .args(["--quiet", "redact", "--json"])
        .arg(&words)
        .output()?;
    assert!(output.status.success());

    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["emails"], 1);
    assert_eq!(result["breakdown"]["ips"], 1);
    assert_eq!(result["breakdown"]["creditCards"], 0);
    let regions = result["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0], serde_json::json!({"x0": 88, "y0": 8, "x1": 252, "y1": 32}));
    Ok(())
}

#[test]
fn regions_out_writes_the_result_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;
    let out = dir.path().join("regions.json");

    autoredact(&dir)
        .args(["redact", "--no-summary", "--regions-out"])
        .arg(&out)
        .arg(&words)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let result: Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    assert_eq!(result["detections"].as_array().unwrap().len(), 2);
    assert_eq!(result["detections"][0]["ruleId"], "builtin:email");
    Ok(())
}

#[test]
fn disabled_categories_are_not_counted() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    let output = autoredact(&dir)
        .args(["-q", "redact", "--json", "--no-emails"])
        .arg(&words)
        .output()?;
    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["emails"], 0);
    assert_eq!(result["breakdown"]["ips"], 1);
    Ok(())
}

#[test]
fn allowlist_flag_exempts_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    let output = autoredact(&dir)
        .args(["-q", "redact", "--json", "--allowlist", "JANE@example.com,10.20.30.40"])
        .arg(&words)
        .output()?;
    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["emails"], 0);
    assert_eq!(result["breakdown"]["ips"], 0);
    assert!(result["regions"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn invalid_custom_regex_warns_but_succeeds() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    autoredact(&dir)
        .args(["redact", "--custom-regex", "(unclosed", "--custom-regex", "serv[a-z]+"])
        .arg(&words)
        .assert()
        .success()
        .stderr(predicate::str::contains("Rule 'custom_regex:cli-0' skipped"));

    let output = autoredact(&dir)
        .args(["-q", "redact", "--json", "--custom-regex", "(unclosed", "--custom-regex", "serv[a-z]+"])
        .arg(&words)
        .output()?;
    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["pii"], 1);
    assert_eq!(result["warnings"][0]["ruleId"], "custom_regex:cli-0");
    Ok(())
}

#[test]
fn config_file_is_applied() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;
    let config = write_file(
        dir.path(),
        "rules.yaml",
        "enabled_builtins: [ip_address]\nblock_words: [\"Contact\"]\nengine:\n  padding: 0\n",
    )?;

    let output = autoredact(&dir)
        .args(["-q", "redact", "--json", "--config"])
        .arg(&config)
        .arg(&words)
        .output()?;
    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["emails"], 0);
    assert_eq!(result["breakdown"]["ips"], 1);
    assert_eq!(result["breakdown"]["pii"], 1);
    let regions = result["regions"].as_array().unwrap();
    assert!(regions.contains(&serde_json::json!({"x0": 10, "y0": 10, "x1": 80, "y1": 30})));
    assert!(regions.contains(&serde_json::json!({"x0": 80, "y0": 40, "x1": 190, "y1": 60})));
    Ok(())
}

#[test]
fn missing_config_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;

    autoredact(&dir)
        .args(["redact", "--config", "/no/such/rules.yaml"])
        .arg(&words)
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/rules.yaml"));
    Ok(())
}

#[test]
fn tesseract_tsv_input_is_read() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
               5\t1\t1\t1\t1\t1\t10\t10\t70\t20\t95\tContact:\n\
               5\t1\t1\t1\t1\t2\t90\t10\t160\t20\t93\tjane@example.com\n";
    let words = write_file(dir.path(), "page.tsv", tsv)?;

    let output = autoredact(&dir)
        .args(["-q", "redact", "--json"])
        .arg(&words)
        .output()?;
    let result = json_stdout(&output.stdout)?;
    assert_eq!(result["breakdown"]["emails"], 1);
    assert_eq!(result["regions"][0], serde_json::json!({"x0": 88, "y0": 8, "x1": 252, "y1": 32}));
    Ok(())
}

#[test]
fn image_is_painted_black_inside_regions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;
    let image_path = dir.path().join("shot.png");
    RgbaImage::from_pixel(300, 80, Rgba([255, 255, 255, 255])).save(&image_path)?;

    autoredact(&dir)
        .args(["redact", "--image"])
        .arg(&image_path)
        .arg(&words)
        .assert()
        .success()
        .stderr(predicate::str::contains("Redacted 2 region(s)"));

    let painted = image::open(dir.path().join("redacted-shot.png"))?.to_rgba8();
    assert_eq!(*painted.get_pixel(100, 20), Rgba([0, 0, 0, 255]));
    assert_eq!(*painted.get_pixel(100, 50), Rgba([0, 0, 0, 255]));
    assert_eq!(*painted.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    assert_eq!(*painted.get_pixel(280, 70), Rgba([255, 255, 255, 255]));
    Ok(())
}

#[test]
fn explicit_output_path_is_used() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", PAGE_JSON)?;
    let image_path = dir.path().join("shot.png");
    let out_path = dir.path().join("clean.png");
    RgbaImage::from_pixel(300, 80, Rgba([255, 255, 255, 255])).save(&image_path)?;

    autoredact(&dir)
        .args(["-q", "redact", "--image"])
        .arg(&image_path)
        .arg("-o")
        .arg(&out_path)
        .arg(&words)
        .assert()
        .success();

    assert!(out_path.exists());
    assert!(!dir.path().join("redacted-shot.png").exists());
    Ok(())
}

#[test]
fn malformed_word_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let words = write_file(dir.path(), "page.json", "{ not json")?;

    autoredact(&dir)
        .arg("redact")
        .arg(&words)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed JSON word list"));
    Ok(())
}
