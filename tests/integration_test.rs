//! Integration tests for the alarm-quote CLI.
//!
//! These tests run the actual binary against catalog files under
//! `tests/data/` and against local mock endpoints.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str =
    "term,total_material_cost,base_rate,initial_cost,monthly_financing_surcharge,final_monthly_cost";

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Binary with the endpoint environment variables cleared
fn command() -> Command {
    let mut cmd = Command::cargo_bin("alarm-quote").unwrap();
    cmd.env_remove("ALARM_QUOTE_CATALOG_URL")
        .env_remove("ALARM_QUOTE_SUBMIT_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the binary with the sample catalog and return stdout lines
fn run_quote(args: &[&str]) -> Vec<String> {
    let catalog = test_data_path("catalog.json");
    let mut cmd = command();
    cmd.arg("--catalog-file").arg(&catalog).args(args);
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone())
        .unwrap()
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn test_default_preset_financed_over_36_months() {
    // hub 50 + 2 x photo detector 45.50 + door contact 12.25 + keypad 35
    let lines = run_quote(&[]);
    assert_eq!(lines, vec![HEADER, "36,188.25,27.99,0.00,5.81,33.80"]);
}

#[test]
fn test_upfront_individual() {
    let lines = run_quote(&["--no-preset", "--set", "sensor=2", "--term", "0"]);
    assert_eq!(lines, vec![HEADER, "0,90.00,27.99,90.00,0.00,27.99"]);
}

#[test]
fn test_financed_business() {
    let lines = run_quote(&[
        "--no-preset",
        "--set",
        "sensor=2",
        "--tier",
        "business",
        "--term",
        "36",
    ]);
    assert_eq!(lines, vec![HEADER, "36,90.00,34.99,0.00,2.78,37.77"]);
}

#[test]
fn test_preset_can_be_overridden() {
    let lines = run_quote(&[
        "--set",
        "fotodetector=0",
        "--set",
        "contacto=0",
        "--set",
        "teclado=0",
        "--term",
        "12",
    ]);
    // hub only: 50 over 12 months
    assert_eq!(lines[1], "12,50.00,27.99,0.00,4.33,32.32");
}

#[test]
fn test_negative_quantity_is_clamped() {
    let lines = run_quote(&["--no-preset", "--set", "sensor=-3", "--term", "0"]);
    assert_eq!(lines[1], "0,50.00,27.99,50.00,0.00,27.99");
}

#[test]
fn test_unknown_component_is_ignored() {
    let lines = run_quote(&["--no-preset", "--set", "laser=4", "--term", "0"]);
    assert_eq!(lines[1], "0,50.00,27.99,50.00,0.00,27.99");
}

#[test]
fn test_zero_cost_catalog_has_no_financing() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"hub": {{"name": "Free hub", "price": 0}}}}"#).unwrap();

    let mut cmd = command();
    cmd.arg("--catalog-file")
        .arg(file.path())
        .args(["--term", "48", "--tier", "business"])
        .assert()
        .success()
        .stdout(predicate::str::contains("48,0.00,34.99,0.00,0.00,34.99"));
}

#[test]
fn test_missing_hub_error() {
    command()
        .arg("--catalog-file")
        .arg(test_data_path("catalog_no_hub.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("hub"));
}

#[test]
fn test_malformed_catalog_error() {
    command()
        .arg("--catalog-file")
        .arg(test_data_path("catalog_malformed.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_file_error() {
    command()
        .args(["--catalog-file", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_catalog_source_error() {
    command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing catalog source"));
}

#[test]
fn test_invalid_term_is_rejected() {
    command()
        .args(["--catalog-file", test_data_path("catalog.json").as_str(), "--term", "18"])
        .assert()
        .failure();
}

#[test]
fn test_malformed_assignment_is_rejected() {
    command()
        .args(["--catalog-file", test_data_path("catalog.json").as_str(), "--set", "sensor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid component assignment"));
}

#[test]
fn test_catalog_from_endpoint() {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "hub": {"name": "Central HUB", "price": 50},
                "sensor": {"name": "Motion sensor", "price": 20}
            }));
    });

    command()
        .args(["--catalog-url", server.url("/catalog").as_str()])
        .args(["--set", "sensor=2", "--term", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0,90.00,27.99,90.00,0.00,27.99"));

    catalog_mock.assert();
}

#[test]
fn test_catalog_endpoint_failure_is_terminal() {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(503);
    });

    command()
        .args(["--catalog-url", server.url("/catalog").as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Could not load the component catalog"));

    catalog_mock.assert();
}

#[test]
fn test_submit_quote() {
    let server = MockServer::start();
    let submit_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/quote")
            .body_contains("\"offerName\":\"O123456\"")
            .body_contains("\"hub\":1")
            .body_contains("\"sensor\":2")
            .body_contains("\"customerType\":\"particular\"")
            .body_contains("\"permanence\":0")
            .body_contains("\"amortizationDetails\":null");
        then.status(200);
    });

    command()
        .args(["--catalog-file", test_data_path("catalog.json").as_str()])
        .args(["--no-preset", "--set", "sensor=2", "--term", "0"])
        .args(["--offer-name", "O123456"])
        .args(["--submit-url", server.url("/quote").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0,90.00,27.99,90.00,0.00,27.99"))
        .stderr(predicate::str::contains("Quote submitted successfully"));

    submit_mock.assert();
}

#[test]
fn test_submit_failure_reports_error() {
    let server = MockServer::start();
    let submit_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(500);
    });

    command()
        .args(["--catalog-file", test_data_path("catalog.json").as_str()])
        .args(["--submit-url", server.url("/quote").as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::contains(HEADER))
        .stderr(predicate::str::contains("Could not submit the quote"))
        .stderr(predicate::str::contains("Unexpected status 500"));

    submit_mock.assert();
}
