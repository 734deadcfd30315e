//! Integration tests for the bandreport CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bandreport(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bandreport").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

const TEMPLATE: &str = r#"
document_name: invoice-template.xlsx
output_type: xlsx
output_name_pattern: "${Root.fileName}"
"#;

const BANDS: &str = r#"{
  "name": "Root",
  "data": { "fileName": "invoice-2024-001" },
  "children": [
    { "name": "Customer", "data": { "id": 7, "code": "ACME" } }
  ]
}"#;

const REPORT: &str = r#"
name: Invoices
parameters:
  - alias: customer
    type: string
    required: true
  - alias: year
    type: integer
    default_value: "2024"
  - alias: draft
    type: boolean
templates:
  DEFAULT:
    document_name: invoice.xlsx
    output_type: pdf
"#;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    bandreport(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandreport resolves report parameters"));

    bandreport(&dir)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Band-based report execution engine"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    bandreport(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandreport"));

    bandreport(&dir)
        .args(["-q", "version"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bandreport "));
}

#[test]
fn test_invalid_subcommand() {
    let dir = TempDir::new().unwrap();
    bandreport(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_name_from_pattern() {
    let dir = TempDir::new().unwrap();
    write(&dir, "template.yaml", TEMPLATE);
    write(&dir, "bands.json", BANDS);

    bandreport(&dir)
        .args(["name", "--template", "template.yaml", "--data", "bands.json"])
        .assert()
        .success()
        .stdout("invoice-2024-001.xlsx\n");

    bandreport(&dir)
        .args(["name", "--template", "template.yaml", "--data", "bands.json", "--output-type", "PDF"])
        .assert()
        .success()
        .stdout("invoice-2024-001.pdf\n");
}

#[test]
fn test_name_with_custom_output_type_keeps_name() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "template.yaml",
        "document_name: export.bin\noutput_type: custom\noutput_name_pattern: \"${Customer.code}.dat\"\n",
    );
    write(&dir, "bands.json", BANDS);

    bandreport(&dir)
        .args(["name", "--template", "template.yaml", "--data", "bands.json"])
        .assert()
        .success()
        .stdout("ACME.dat\n");
}

#[test]
fn test_name_with_unknown_band_fails() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "template.yaml",
        "document_name: t.docx\noutput_type: docx\noutput_name_pattern: \"${Orders.number}\"\n",
    );
    write(&dir, "bands.json", BANDS);

    bandreport(&dir)
        .args(["name", "--template", "template.yaml", "--data", "bands.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data in band [Orders] found"));
}

#[test]
fn test_params_resolution() {
    let dir = TempDir::new().unwrap();
    write(&dir, "report.yaml", REPORT);

    bandreport(&dir)
        .args(["params", "--report", "report.yaml", "--param", "customer=ACME", "-p", "draft=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""customer": "ACME""#))
        .stdout(predicate::str::contains(r#""year": 2024"#))
        .stdout(predicate::str::contains(r#""draft": true"#));
}

#[test]
fn test_params_missing_required() {
    let dir = TempDir::new().unwrap();
    write(&dir, "report.yaml", REPORT);

    bandreport(&dir)
        .args(["params", "--report", "report.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Required report parameter \"customer\" not found"));
}

#[test]
fn test_params_rejects_malformed_pair() {
    let dir = TempDir::new().unwrap();
    write(&dir, "report.yaml", REPORT);

    bandreport(&dir)
        .args(["params", "--report", "report.yaml", "--param", "customer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ALIAS=VALUE"));
}

#[test]
fn test_undeclared_params_follow_config() {
    let dir = TempDir::new().unwrap();
    write(&dir, "report.yaml", REPORT);

    bandreport(&dir)
        .args(["params", "--report", "report.yaml", "-p", "customer=ACME", "-p", "extra=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extra").not());

    write(&dir, "bandreport.toml", "[parameters]\nkeep_undeclared = true\n");
    bandreport(&dir)
        .args(["params", "--report", "report.yaml", "-p", "customer=ACME", "-p", "extra=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""extra": "1""#));
}

#[test]
fn test_config_operations() {
    let dir = TempDir::new().unwrap();

    bandreport(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep_undeclared = false"))
        .stdout(predicate::str::contains("put_empty_row_if_no_data = true"));

    write(&dir, "custom.yaml", "logging:\n  level: debug\n");
    bandreport(&dir)
        .args(["config", "validate", "--config", "custom.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_rejects_bad_level() {
    let dir = TempDir::new().unwrap();
    write(&dir, "custom.toml", "[logging]\nlevel = \"loud\"\n");

    bandreport(&dir)
        .args(["config", "validate", "--config", "custom.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.level"));
}

#[test]
fn test_env_overrides_config() {
    let dir = TempDir::new().unwrap();

    bandreport(&dir)
        .env("BANDREPORT_EXTRACTION__PUT_EMPTY_ROW_IF_NO_DATA", "false")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("put_empty_row_if_no_data = false"));
}
