//! End-to-end tests for the `pnf-check` binary

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pnf-check").unwrap();
    cmd.env_remove("PNF_CUTOVER_DATE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn decide_follow_up() {
    cmd()
        .args([
            "decide",
            "--last-filing", "2022-08-01",
            "--claim-start", "2022-01-01",
            "--claim-end", "2022-12-31",
        ])
        .assert()
        .success()
        .stdout(contains("Follow-up question needed"))
        .stdout(contains("2022-01-01 to 2023-07-01"));
}

#[test]
fn decide_json() {
    let output = cmd()
        .args([
            "--json", "decide",
            "--last-filing", "2024-01-15",
            "--claim-start", "2023-04-01",
            "--claim-end", "2023-06-30",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "NoPnfRequired");
    assert_eq!(value["rule"], "AfterWindowPostCutover");
    assert_eq!(value["notification_period"]["end"], "2023-12-30");
}

#[test]
fn invalid_date_is_rejected_by_parser() {
    cmd()
        .args([
            "decide",
            "--last-filing", "2023-02-30",
            "--claim-start", "2022-01-01",
            "--claim-end", "2022-12-31",
        ])
        .assert()
        .failure()
        .stderr(contains("not a calendar day"));
}

#[test]
fn cutover_from_environment() {
    cmd()
        .env("PNF_CUTOVER_DATE", "2022-01-01")
        .args([
            "decide",
            "--last-filing", "2023-01-15",
            "--claim-start", "2021-06-01",
            "--claim-end", "2022-06-30",
        ])
        .assert()
        .success()
        .stdout(contains("Rule: after_window_transitional"));
}

#[test]
fn walkthrough_reports_verdict_and_rejections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("answers.json");
    fs::write(
        &path,
        r#"[
            {"question": "ever_claimed", "value": true},
            {"question": "last_filing_date", "value": null},
            {"question": "last_filing_date", "value": "2022-08-01"},
            {"question": "claim_period", "value": {"start": "2022-12-31", "end": "2022-01-01"}},
            {"question": "claim_period", "value": {"start": "2022-01-01", "end": "2022-12-31"}},
            {"question": "submission_type", "value": "original"}
        ]"#,
    )
    .unwrap();

    cmd()
        .arg("walkthrough")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Verdict: No PNF required"))
        .stdout(contains("Rejected answer 2"))
        .stdout(contains("Rejected answer 4"));
}

#[test]
fn walkthrough_stops_on_out_of_order_answer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("answers.json");
    fs::write(&path, r#"[{"question": "submission_type", "value": "amended"}]"#).unwrap();

    cmd()
        .arg("walkthrough")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("cannot be applied"));
}

#[test]
fn walkthrough_missing_file() {
    cmd()
        .args(["walkthrough", "/nonexistent/answers.json"])
        .assert()
        .failure()
        .stderr(contains("Failed to read answers"));
}
