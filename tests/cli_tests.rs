mod common;
use common::{Sandbox, read};
use predicates::prelude::*;
use serde_json::Value;

/// alice works Christmas Day 08:00-17:30 with a lunch break in between.
fn christmas_shift() -> Sandbox {
    let sb = Sandbox::new();
    sb.init();
    sb.add_user("alice");

    sb.scan("entry", "alice", "2024-12-25 08:00");
    sb.scan("start_lunch", "alice", "2024-12-25 12:00");
    sb.scan("end_lunch", "alice", "2024-12-25 12:45");
    sb.scan("exit", "alice", "2024-12-25 17:30");
    sb
}

fn stdout_of(sb: &Sandbox, args: &[&str]) -> String {
    let out = sb.cmd().args(args).output().expect("run qrattend");
    assert!(out.status.success(), "{args:?} failed: {out:?}");
    String::from_utf8(out.stdout).expect("utf8 stdout")
}

#[test]
fn test_init_creates_database() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(std::path::Path::new(&sb.db).exists());
}

#[test]
fn test_user_add_prints_qr_and_rejects_duplicates() {
    let sb = Sandbox::new();
    sb.init();

    sb.cmd()
        .args(["user", "add", "alice", "--role", "supervisor", "--area", "ops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QR: user:alice:"));

    sb.cmd()
        .args(["user", "add", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists"));

    sb.cmd()
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("supervisor").and(predicate::str::contains("ops")));
}

#[test]
fn test_scan_by_qr_payload() {
    let sb = Sandbox::new();
    sb.init();
    sb.add_user("bob");

    let qr = stdout_of(&sb, &["user", "qr", "bob"]).trim().to_string();
    assert!(qr.starts_with("user:bob:"));

    sb.cmd()
        .args(["scan", "entry", "--qr", &qr, "--at", "2024-09-02 08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded: bob - entry at 2024-09-02 08:00:00"));

    sb.cmd()
        .args(["scan", "exit", "--qr", "user:bob:deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn test_scan_rejects_unknown_kind() {
    let sb = Sandbox::new();
    sb.init();
    sb.add_user("bob");

    sb.cmd()
        .args(["scan", "coffee", "--user", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event kind"));
}

#[test]
fn test_report_json_on_holiday() {
    let sb = christmas_shift();

    let out = stdout_of(&sb, &["report", "--json"]);
    let json: Value = serde_json::from_str(&out).expect("report is JSON");

    let alice = &json["alice"];
    assert_eq!(alice["total_hours"], 9.5);
    assert_eq!(alice["holiday_or_sunday_hours"], 9.5);
    assert_eq!(alice["overtime_hours"], 1.5);
}

#[test]
fn test_report_table_and_period_filter() {
    let sb = christmas_shift();
    sb.scan("entry", "alice", "2024-12-26 08:00");
    sb.scan("exit", "alice", "2024-12-26 12:00");

    sb.cmd()
        .args(["report", "--period", "2024-12-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice").and(predicate::str::contains("4.00")));
}

#[test]
fn test_logs_search_and_delete() {
    let sb = christmas_shift();

    sb.cmd()
        .args(["logs", "--kind", "exit"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2024-12-25 17:30:00")
                .and(predicate::str::contains("08:00:00").not()),
        );

    sb.cmd()
        .args(["logs", "--delete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Event not found: 999"));

    sb.cmd()
        .args(["logs", "--delete", "1"])
        .assert()
        .success();

    sb.cmd()
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-12-25 08:00:00").not());
}

#[test]
fn test_export_events_csv() {
    let sb = christmas_shift();
    let file = sb.path("events.csv");

    sb.cmd()
        .args(["export", "--format", "csv", "--file", &file])
        .assert()
        .success();

    let csv = read(&file);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id,employee,kind,timestamp"));
    // newest first
    assert_eq!(lines.next(), Some("4,alice,exit,2024-12-25 17:30:00"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn test_export_summary_csv() {
    let sb = christmas_shift();
    let file = sb.path("payroll.csv");

    sb.cmd()
        .args(["export", "--file", &file, "--summary"])
        .assert()
        .success();

    let csv = read(&file);
    assert!(csv.starts_with("employee,total_hours,holiday_or_sunday_hours,overtime_hours"));
    assert!(csv.contains("alice,9.5,9.5,1.5"));
}

#[test]
fn test_export_json_has_summary_and_events() {
    let sb = christmas_shift();
    let file = sb.path("report.json");

    sb.cmd()
        .args(["export", "--format", "json", "--file", &file])
        .assert()
        .success();

    let json: Value = serde_json::from_str(&read(&file)).expect("valid JSON");
    assert_eq!(json["summary"]["alice"]["overtime_hours"], 1.5);
    assert_eq!(json["events"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_export_pdf() {
    let sb = christmas_shift();
    let file = sb.path("report.pdf");

    sb.cmd()
        .args(["export", "--format", "pdf", "--file", &file, "--from", "2024-12-01"])
        .assert()
        .success();

    let bytes = std::fs::read(&file).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_requires_absolute_path() {
    let sb = christmas_shift();

    sb.cmd()
        .args(["export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_export_with_no_matches_writes_nothing() {
    let sb = christmas_shift();
    let file = sb.path("empty.csv");

    sb.cmd()
        .args(["export", "--file", &file, "--period", "2023"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No events found"));

    assert!(!std::path::Path::new(&file).exists());
}

#[test]
fn test_holidays_check() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["holidays", "--check", "2024-12-25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("non-working").and(predicate::str::contains("holiday")));

    sb.cmd()
        .args(["holidays", "--check", "2024-12-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": working [working day]"));

    sb.cmd()
        .args(["holidays", "--check", "25/12/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_audit_log_records_operations() {
    let sb = christmas_shift();

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user_add").and(predicate::str::contains("scan")));
}

#[test]
fn test_report_lists_employees_without_sessions() {
    let sb = christmas_shift();

    let out = stdout_of(&sb, &["report", "--json", "--kind", "entry"]);
    let json: Value = serde_json::from_str(&out).expect("report is JSON");

    assert_eq!(json["alice"]["total_hours"], 0.0);
    assert_eq!(json["alice"]["overtime_hours"], 0.0);
}

#[test]
fn test_export_with_no_matches_keeps_existing_file_without_asking() {
    let sb = christmas_shift();
    let file = sb.path("existing.csv");
    std::fs::write(&file, "keep me\n").expect("seed file");

    sb.cmd()
        .args(["export", "--file", &file, "--period", "2023"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrite?").not())
        .stderr(predicate::str::contains("No events found"));

    assert_eq!(read(&file), "keep me\n");
}

#[test]
fn test_export_pdf_encodes_accented_names() {
    let sb = Sandbox::new();
    sb.init();
    sb.add_user("José");
    sb.scan("entry", "José", "2024-09-02 08:00");
    sb.scan("exit", "José", "2024-09-02 16:00");
    let file = sb.path("accents.pdf");

    sb.cmd()
        .args(["export", "--format", "pdf", "--file", &file])
        .assert()
        .success();

    let bytes = std::fs::read(&file).expect("read pdf");
    let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);

    assert!(contains(b"/WinAnsiEncoding"));
    // "José" in WinAnsi is 4A 6F 73 E9
    assert!(contains(b"<4A6F73E9>"));
    assert!(!contains("José".as_bytes()));
}
